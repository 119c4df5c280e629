//! Thai date rendering with Buddhist-Era years.

use chrono::{Datelike, NaiveDate};

use crate::era::to_display_year;

/// Thai month names, 1-based (index 0 is January / มกราคม).
pub const THAI_MONTHS_FULL: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Abbreviated Thai month names, 1-based.
pub const THAI_MONTHS_ABBREV: [&str; 12] = [
    "ม.ค.",
    "ก.พ.",
    "มี.ค.",
    "เม.ย.",
    "พ.ค.",
    "มิ.ย.",
    "ก.ค.",
    "ส.ค.",
    "ก.ย.",
    "ต.ค.",
    "พ.ย.",
    "ธ.ค.",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThaiDateStyle {
    /// `15 มกราคม 2534`
    #[default]
    FullMonth,
    /// `15 ม.ค. 2534`
    Abbreviated,
}

/// Full Thai month name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    THAI_MONTHS_FULL.get(month.checked_sub(1)? as usize).copied()
}

/// Abbreviated Thai month name for a 1-based month number.
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    THAI_MONTHS_ABBREV
        .get(month.checked_sub(1)? as usize)
        .copied()
}

/// Render a calendar date in Thai with the Buddhist-Era year.
pub fn format_thai(date: NaiveDate, style: ThaiDateStyle) -> String {
    let month = match style {
        ThaiDateStyle::FullMonth => THAI_MONTHS_FULL[date.month0() as usize],
        ThaiDateStyle::Abbreviated => THAI_MONTHS_ABBREV[date.month0() as usize],
    };
    format!("{} {} {}", date.day(), month, to_display_year(date.year()))
}

#[cfg(test)]
mod tests {
    use super::{ThaiDateStyle, format_thai, month_abbrev, month_name};
    use chrono::NaiveDate;

    #[test]
    fn renders_both_styles() {
        let date = NaiveDate::from_ymd_opt(1991, 1, 15).unwrap();
        assert_eq!(format_thai(date, ThaiDateStyle::FullMonth), "15 มกราคม 2534");
        assert_eq!(format_thai(date, ThaiDateStyle::Abbreviated), "15 ม.ค. 2534");
    }

    #[test]
    fn month_names_are_one_based() {
        assert_eq!(month_name(1), Some("มกราคม"));
        assert_eq!(month_name(12), Some("ธันวาคม"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_abbrev(2), Some("ก.พ."));
    }
}
