use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use memdir_model::DateValue;
use memdir_select::{DateSelector, FormControl};

fn make_selector() -> DateSelector {
    // Window ending at BE 2568 (CE 2025), a century back.
    DateSelector::with_year_window(2568, 100)
}

fn capture_emissions(selector: &mut DateSelector) -> Rc<RefCell<Vec<Option<NaiveDate>>>> {
    let seen: Rc<RefCell<Vec<Option<NaiveDate>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    selector.register_on_change(Box::new(move |value| sink.borrow_mut().push(value)));
    seen
}

#[test]
fn emits_constructed_date_when_triple_completes() {
    let mut selector = make_selector();
    let seen = capture_emissions(&mut selector);

    selector.select_day(15);
    selector.select_month(1);
    assert_eq!(*seen.borrow(), vec![None, None]);

    selector.select_year(2534);
    assert_eq!(
        seen.borrow().last().unwrap(),
        &NaiveDate::from_ymd_opt(1991, 1, 15)
    );
}

#[test]
fn month_change_clears_out_of_range_day() {
    let mut selector = make_selector();
    selector.select_year(2566); // CE 2023, not a leap year
    selector.select_month(1);
    selector.select_day(31);
    assert_eq!(selector.selection(), (Some(31), Some(1), Some(2566)));

    let seen = capture_emissions(&mut selector);
    selector.select_month(2);
    assert_eq!(selector.selection(), (None, Some(2), Some(2566)));
    // No complete date until the day is re-chosen.
    assert_eq!(*seen.borrow(), vec![None]);

    selector.select_day(28);
    assert_eq!(
        selector.value(),
        NaiveDate::from_ymd_opt(2023, 2, 28)
    );
}

#[test]
fn year_change_clears_leap_day_in_common_year() {
    let mut selector = make_selector();
    selector.select_year(2567); // CE 2024, leap year
    selector.select_month(2);
    selector.select_day(29);
    assert_eq!(selector.value(), NaiveDate::from_ymd_opt(2024, 2, 29));

    selector.select_year(2566); // CE 2023
    assert_eq!(selector.selection(), (None, Some(2), Some(2566)));
    assert_eq!(selector.value(), None);
}

#[test]
fn day_options_shrink_once_month_and_year_are_known() {
    let mut selector = make_selector();
    assert_eq!(selector.day_options().len(), 31);

    selector.select_month(2);
    // Month alone does not constrain the range.
    assert_eq!(selector.day_options().len(), 31);

    selector.select_year(2566);
    assert_eq!(selector.day_options().len(), 28);

    selector.select_year(2567);
    assert_eq!(selector.day_options().len(), 29);
}

#[test]
fn writes_accept_both_wire_shapes() {
    let date = NaiveDate::from_ymd_opt(1991, 1, 15).unwrap();

    let mut selector = make_selector();
    selector.write_value(Some(DateValue::Calendar(date)));
    assert_eq!(selector.selection(), (Some(15), Some(1), Some(2534)));
    assert_eq!(selector.value(), Some(date));

    let mut selector = make_selector();
    let seconds = date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp();
    selector.write_value(Some(DateValue::Epoch {
        seconds,
        nanoseconds: 0,
    }));
    assert_eq!(selector.value(), Some(date));
}

#[test]
fn written_year_may_fall_outside_the_window() {
    let mut selector = DateSelector::with_year_window(2568, 10);
    let date = NaiveDate::from_ymd_opt(1991, 1, 15).unwrap();
    selector.write_value(Some(DateValue::Calendar(date)));
    assert_eq!(selector.value(), Some(date));

    // But a user-driven pick outside the window is rejected.
    selector.select_year(2500);
    assert_eq!(selector.selection().2, None);
}

#[test]
fn invalid_write_clears_all_slots() {
    let mut selector = make_selector();
    selector.select_day(15);
    selector.select_month(1);
    selector.select_year(2534);

    selector.write_value(None);
    assert_eq!(selector.selection(), (None, None, None));

    selector.select_day(15);
    // An epoch far outside the representable range normalizes to
    // "no selection".
    selector.write_value(Some(DateValue::Epoch {
        seconds: i64::MAX,
        nanoseconds: 0,
    }));
    assert_eq!(selector.selection(), (None, None, None));
}

#[test]
fn write_does_not_emit_or_touch() {
    let mut selector = make_selector();
    let seen = capture_emissions(&mut selector);
    selector.write_value(Some(DateValue::Calendar(
        NaiveDate::from_ymd_opt(1991, 1, 15).unwrap(),
    )));
    assert!(seen.borrow().is_empty());
    assert!(!selector.is_touched());
}

#[test]
fn disabled_selector_freezes_user_transitions() {
    let mut selector = make_selector();
    selector.select_day(15);
    let seen = capture_emissions(&mut selector);

    selector.set_disabled(true);
    selector.select_month(1);
    selector.select_year(2534);
    selector.select_day(20);
    assert_eq!(selector.selection(), (Some(15), None, None));
    assert!(seen.borrow().is_empty());
}

#[test]
fn touched_fires_once() {
    let mut selector = make_selector();
    let touches = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&touches);
    selector.register_on_touched(Box::new(move || *counter.borrow_mut() += 1));

    selector.select_day(15);
    selector.select_month(1);
    selector.select_year(2534);
    assert_eq!(*touches.borrow(), 1);
}

#[test]
fn rejected_pick_that_changes_nothing_does_not_emit() {
    let mut selector = make_selector();
    let seen = capture_emissions(&mut selector);
    selector.select_month(13);
    assert_eq!(selector.selection(), (None, None, None));
    assert!(seen.borrow().is_empty());
    assert!(!selector.is_touched());
}

#[test]
fn month_options_are_thai_names() {
    let selector = make_selector();
    let months = selector.month_options();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0], (1, "มกราคม"));
    assert_eq!(months[11], (12, "ธันวาคม"));
}
