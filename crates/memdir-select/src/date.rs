//! The day/month/year selector with Buddhist-Era display years.
//!
//! The three slots have no parent->child option filtering (each list is
//! independent); the one inter-slot constraint is the day-range rule: a
//! month or year change re-derives the legal day range, and a selected
//! day outside the new range is cleared. That is a sibling-triggered
//! reset, kept separate from the cascade rule of the address selector.

use chrono::{Datelike, NaiveDate, Utc};
use tracing::debug;

use memdir_calendar::{days_in_month, month_name, to_calendar_year, to_display_year};
use memdir_model::DateValue;

use crate::control::{ChangeFn, EmitTiming, FormControl, HostBinding, TouchedFn};

/// Days shown before both month and year are chosen.
const DEFAULT_DAY_SPAN: u32 = 31;

/// Years offered by default: the current Buddhist-Era year back 100.
const DEFAULT_YEAR_SPAN: u32 = 100;

type Selection = (Option<u32>, Option<u32>, Option<i32>);

/// Day/month/year selector. Years are held and exchanged as
/// Buddhist-Era display years; all calendar arithmetic converts to
/// Gregorian years first.
pub struct DateSelector {
    selected_day: Option<u32>,
    /// 1-based month.
    selected_month: Option<u32>,
    /// Buddhist-Era display year.
    selected_year: Option<i32>,
    /// Offered display years, newest first.
    year_options: Vec<i32>,
    disabled: bool,
    binding: HostBinding<NaiveDate>,
}

impl DateSelector {
    /// Selector with the default year window ending at the current year.
    pub fn new() -> Self {
        let latest = to_display_year(Utc::now().date_naive().year());
        Self::with_year_window(latest, DEFAULT_YEAR_SPAN)
    }

    /// Selector offering `latest_display_year` down through
    /// `latest_display_year - span`.
    pub fn with_year_window(latest_display_year: i32, span: u32) -> Self {
        Self {
            selected_day: None,
            selected_month: None,
            selected_year: None,
            year_options: (0..=span)
                .map(|offset| latest_display_year - offset as i32)
                .collect(),
            disabled: false,
            binding: HostBinding::new(EmitTiming::Immediate),
        }
    }

    pub fn with_emit_timing(mut self, timing: EmitTiming) -> Self {
        self.binding = HostBinding::new(timing);
        self
    }

    // --- user-driven transitions ---

    pub fn select_day(&mut self, day: u32) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        if day >= 1 && day <= self.max_day() {
            self.selected_day = Some(day);
        } else {
            debug!(day, "day outside legal range; clearing slot");
            self.selected_day = None;
        }
        self.after_user_change(before);
    }

    pub fn select_month(&mut self, month: u32) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        if (1..=12).contains(&month) {
            self.selected_month = Some(month);
        } else {
            debug!(month, "month outside 1..=12; clearing slot");
            self.selected_month = None;
        }
        self.clamp_day();
        self.after_user_change(before);
    }

    /// Select a Buddhist-Era year. Years outside the offered window are
    /// rejected like any other orphaned reference.
    pub fn select_year(&mut self, display_year: i32) {
        if self.disabled {
            return;
        }
        let before = self.selection();
        if self.year_options.contains(&display_year) {
            self.selected_year = Some(display_year);
        } else {
            debug!(display_year, "year outside window; clearing slot");
            self.selected_year = None;
        }
        self.clamp_day();
        self.after_user_change(before);
    }

    // --- derived state ---

    /// Legal days under the current month/year pair: `1..=31` until
    /// both are chosen, then `1..=days_in_month`.
    pub fn day_options(&self) -> Vec<u32> {
        (1..=self.max_day()).collect()
    }

    /// `(number, Thai name)` pairs for the twelve months.
    pub fn month_options(&self) -> Vec<(u32, &'static str)> {
        (1..=12)
            .filter_map(|month| month_name(month).map(|name| (month, name)))
            .collect()
    }

    /// Offered Buddhist-Era years, newest first.
    pub fn year_options(&self) -> &[i32] {
        &self.year_options
    }

    /// `(day, month, display year)`.
    pub fn selection(&self) -> Selection {
        (self.selected_day, self.selected_month, self.selected_year)
    }

    /// The constructed calendar date, `Some` only when day, month, and
    /// year are all selected.
    pub fn value(&self) -> Option<NaiveDate> {
        let (Some(day), Some(month), Some(year)) = self.selection() else {
            return None;
        };
        NaiveDate::from_ymd_opt(to_calendar_year(year), month, day)
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_touched(&self) -> bool {
        self.binding.is_touched()
    }

    pub fn flush_emission(&mut self) {
        self.binding.flush();
    }

    // --- internals ---

    fn max_day(&self) -> u32 {
        match (self.selected_month, self.selected_year) {
            (Some(month), Some(year)) => {
                days_in_month(to_calendar_year(year), month).unwrap_or(DEFAULT_DAY_SPAN)
            }
            _ => DEFAULT_DAY_SPAN,
        }
    }

    /// The sibling reset: clear a day the new month/year pair no longer
    /// allows.
    fn clamp_day(&mut self) {
        if let Some(day) = self.selected_day
            && day > self.max_day()
        {
            debug!(day, "day exceeds new month length; clearing");
            self.selected_day = None;
        }
    }

    fn after_user_change(&mut self, before: Selection) {
        if self.selection() == before {
            return;
        }
        self.binding.touch();
        let value = self.value();
        self.binding.emit(value);
    }
}

impl Default for DateSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl FormControl for DateSelector {
    type Write = DateValue;
    type Emit = NaiveDate;

    /// Accept an external date in any supported shape. Invalid or
    /// unrecognized values clear all three slots; host-written dates
    /// are not constrained to the year window.
    fn write_value(&mut self, value: Option<DateValue>) {
        match value.and_then(|v| v.to_calendar_date()) {
            Some(date) => {
                self.selected_month = Some(date.month());
                self.selected_year = Some(to_display_year(date.year()));
                self.selected_day = Some(date.day());
            }
            None => {
                self.selected_day = None;
                self.selected_month = None;
                self.selected_year = None;
            }
        }
    }

    fn register_on_change(&mut self, callback: ChangeFn<NaiveDate>) {
        self.binding.register_on_change(callback);
    }

    fn register_on_touched(&mut self, callback: TouchedFn) {
        self.binding.register_on_touched(callback);
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}
