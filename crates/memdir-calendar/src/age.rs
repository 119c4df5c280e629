//! Age calculation: full years, then remaining months, then days.

use chrono::{Datelike, Months, NaiveDate};

/// Placeholder shown when a birth date is missing or unusable.
pub const NO_BIRTHDATE: &str = "ไม่มีข้อมูลวันเกิด";

/// An elapsed span split the way ages are quoted: whole years first,
/// then whole months past the last birthday, then leftover days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeSpan {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl AgeSpan {
    /// Thai rendering, e.g. `"30 ปี 5 เดือน 10 วัน"`.
    pub fn to_thai(&self) -> String {
        format!("{} ปี {} เดือน {} วัน", self.years, self.months, self.days)
    }
}

/// Split `birth..today` into an [`AgeSpan`].
///
/// End-of-month birthdays clamp the same way the anchor-date addition
/// does (a Jan 31 birth measured on Mar 1 is 1 month 1 day). Returns
/// `None` when `birth` is after `today`.
pub fn age_between(birth: NaiveDate, today: NaiveDate) -> Option<AgeSpan> {
    if birth > today {
        return None;
    }

    let mut years = today.year() - birth.year();
    if add_months_clamped(birth, years * 12) > today {
        years -= 1;
    }
    let anchor = add_months_clamped(birth, years * 12);

    let mut months =
        (today.year() - anchor.year()) * 12 + today.month() as i32 - anchor.month() as i32;
    if add_months_clamped(anchor, months) > today {
        months -= 1;
    }
    let anchor = add_months_clamped(anchor, months);

    let days = (today - anchor).num_days();
    Some(AgeSpan {
        years: years as u32,
        months: months as u32,
        days: days as u32,
    })
}

/// Render an optional birth date as a Thai age string; absent or
/// future-dated births render the placeholder instead of erroring.
pub fn age_text(birth: Option<NaiveDate>, today: NaiveDate) -> String {
    match birth.and_then(|birth| age_between(birth, today)) {
        Some(span) => span.to_thai(),
        None => NO_BIRTHDATE.to_string(),
    }
}

fn add_months_clamped(date: NaiveDate, months: i32) -> NaiveDate {
    if months >= 0 {
        date.checked_add_months(Months::new(months as u32))
            .unwrap_or(date)
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
            .unwrap_or(date)
    }
}

#[cfg(test)]
mod tests {
    use super::{AgeSpan, age_between, age_text};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn whole_years() {
        let span = age_between(date(1991, 1, 15), date(2021, 1, 15)).unwrap();
        assert_eq!(
            span,
            AgeSpan {
                years: 30,
                months: 0,
                days: 0
            }
        );
    }

    #[test]
    fn years_months_days() {
        let span = age_between(date(1991, 1, 15), date(2021, 6, 25)).unwrap();
        assert_eq!(
            span,
            AgeSpan {
                years: 30,
                months: 5,
                days: 10
            }
        );
        assert_eq!(span.to_thai(), "30 ปี 5 เดือน 10 วัน");
    }

    #[test]
    fn day_before_birthday() {
        let span = age_between(date(1991, 1, 15), date(2021, 1, 14)).unwrap();
        assert_eq!(span.years, 29);
        assert_eq!(span.months, 11);
    }

    #[test]
    fn end_of_month_birth_clamps() {
        let span = age_between(date(2000, 1, 31), date(2001, 3, 1)).unwrap();
        assert_eq!(
            span,
            AgeSpan {
                years: 1,
                months: 1,
                days: 1
            }
        );
    }

    #[test]
    fn missing_or_future_birth_renders_placeholder() {
        let today = date(2021, 1, 1);
        assert_eq!(age_text(None, today), "ไม่มีข้อมูลวันเกิด");
        assert_eq!(age_text(Some(date(2030, 1, 1)), today), "ไม่มีข้อมูลวันเกิด");
    }
}
