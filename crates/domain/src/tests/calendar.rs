// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{calendar_days_back, is_work_day};
use time::macros::date;

#[test]
fn test_zero_working_days_is_zero_calendar_days() {
    assert_eq!(calendar_days_back(0, date!(2026 - 01 - 05)), 0);
}

#[test]
fn test_negative_working_days_is_zero_calendar_days() {
    assert_eq!(calendar_days_back(-3, date!(2026 - 01 - 05)), 0);
}

#[test]
fn test_five_working_days_from_monday_spans_a_full_week() {
    // 2026-01-05 is a Monday; five working days back crosses one weekend.
    assert_eq!(calendar_days_back(5, date!(2026 - 01 - 05)), 7);
}

#[test]
fn test_one_working_day_from_monday_reaches_friday() {
    // Friday is three calendar days back from Monday.
    assert_eq!(calendar_days_back(1, date!(2026 - 01 - 05)), 3);
}

#[test]
fn test_one_working_day_from_wednesday_is_one_calendar_day() {
    // 2026-01-07 is a Wednesday.
    assert_eq!(calendar_days_back(1, date!(2026 - 01 - 07)), 1);
}

#[test]
fn test_monotonic_non_decreasing_in_working_days() {
    let today = date!(2026 - 01 - 05);
    let mut previous: u32 = 0;
    for n in 0..30 {
        let days: u32 = calendar_days_back(n, today);
        assert!(days >= previous, "calendar_days_back({n}) decreased");
        previous = days;
    }
}

#[test]
fn test_weekend_days_are_not_working_days() {
    assert!(!is_work_day(date!(2026 - 01 - 03))); // Saturday
    assert!(!is_work_day(date!(2026 - 01 - 04))); // Sunday
    assert!(is_work_day(date!(2026 - 01 - 05))); // Monday
    assert!(is_work_day(date!(2026 - 01 - 09))); // Friday
}
