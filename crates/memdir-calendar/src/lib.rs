//! Thai Buddhist-calendar utilities.
//!
//! Internally every computation runs on Gregorian calendar dates; the
//! Buddhist-Era offset is applied only when a year crosses the display
//! or wire boundary. See [`era`] for the round-trip invariant.

pub mod age;
pub mod era;
pub mod format;

pub use age::{AgeSpan, NO_BIRTHDATE, age_between, age_text};
pub use era::{ERA_OFFSET, days_in_month, to_calendar_year, to_display_year};
pub use format::{
    THAI_MONTHS_ABBREV, THAI_MONTHS_FULL, ThaiDateStyle, format_thai, month_abbrev, month_name,
};
