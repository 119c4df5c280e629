//! Buddhist-Era year numbering.
//!
//! Thai forms display years in the Buddhist Era (พ.ศ.), a fixed offset
//! from the Gregorian calendar year. All date arithmetic in this
//! workspace runs in calendar years; the offset is applied only at the
//! display/wire boundary, and the pair must round-trip exactly:
//! `to_display_year(to_calendar_year(y)) == y` for every year.

use chrono::NaiveDate;

/// Offset between a Buddhist-Era year and the Gregorian calendar year.
pub const ERA_OFFSET: i32 = 543;

/// Calendar (Gregorian) year -> Buddhist-Era display year.
pub fn to_display_year(calendar_year: i32) -> i32 {
    calendar_year + ERA_OFFSET
}

/// Buddhist-Era display year -> calendar (Gregorian) year.
pub fn to_calendar_year(display_year: i32) -> i32 {
    display_year - ERA_OFFSET
}

/// Number of days in the given calendar month, or `None` when the
/// year/month pair is not a valid calendar month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, to_calendar_year, to_display_year};

    #[test]
    fn era_offset_round_trips() {
        for display_year in 2400..=2600 {
            assert_eq!(to_display_year(to_calendar_year(display_year)), display_year);
        }
        assert_eq!(to_display_year(1991), 2534);
        assert_eq!(to_calendar_year(2534), 1991);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2023, 1), Some(31));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2100, 2), Some(28));
        assert_eq!(days_in_month(2023, 4), Some(30));
        assert_eq!(days_in_month(2023, 12), Some(31));
        assert_eq!(days_in_month(2023, 13), None);
        assert_eq!(days_in_month(2023, 0), None);
    }
}
