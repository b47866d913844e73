// Copyright (C) 2026 The timetracker authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Working-day calendar arithmetic.
//!
//! The tracking grid asks for "the last N working days"; the entry query
//! needs a calendar date range. The conversion walks backward one calendar
//! day at a time, decrementing the working-day counter only on Monday through
//! Friday.

use time::{Date, Weekday};

/// Whether the given date is a working day (Monday through Friday).
#[must_use]
pub const fn is_work_day(day: Date) -> bool {
    !matches!(day.weekday(), Weekday::Saturday | Weekday::Sunday)
}

/// Converts a working-day count into the number of calendar days it spans,
/// counting backward from `today`.
///
/// Walking back 5 working days from a Monday crosses a full weekend and
/// yields 7 calendar days. Zero or negative working-day counts yield 0.
///
/// # Arguments
///
/// * `working_days` - How many working days to cover
/// * `today` - The day to count backward from
#[must_use]
pub fn calendar_days_back(working_days: i32, today: Date) -> u32 {
    if working_days <= 0 {
        return 0;
    }

    let mut remaining: i32 = working_days;
    let mut calendar_days: u32 = 0;
    let mut cursor: Date = today;

    while remaining > 0 {
        // Date::MIN underflow terminates the walk instead of panicking.
        let Some(previous) = cursor.previous_day() else {
            break;
        };
        cursor = previous;
        calendar_days += 1;
        if is_work_day(cursor) {
            remaining -= 1;
        }
    }

    calendar_days
}
