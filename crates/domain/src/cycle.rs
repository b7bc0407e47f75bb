// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting cycle calculation.
//!
//! Driver performance is reported over recurring one-month windows
//! anchored on the 25th of each calendar month: a cycle runs from the
//! 25th of one month to the 25th of the next. Which window is "current"
//! depends on where today falls relative to the anchor day.
//!
//! ## Invariants
//!
//! - `start` is always the 25th of some month
//! - `end` is always the 25th of the following month
//! - `start < end`
//! - consecutive windows are contiguous (each window's end date is the
//!   next window's start date) and correct across year boundaries

use time::{Date, Month};

/// Day of month the reporting cycle is anchored on.
pub const CYCLE_ANCHOR_DAY: u8 = 25;

/// A reporting window from one anchor day to the next.
///
/// Both ends are inclusive when filtering orders by date, matching the
/// store-side range queries this window is handed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleWindow {
    /// The 25th of the window's opening month.
    pub start: Date,
    /// The 25th of the following month.
    pub end: Date,
}

impl CycleWindow {
    /// Computes the cycle window containing the given day.
    ///
    /// If `today` is on or after the 25th, the window opens on the 25th
    /// of today's month; otherwise it opened on the 25th of the previous
    /// month. January with day < 25 therefore starts in December of the
    /// prior year.
    #[must_use]
    pub fn containing(today: Date) -> Self {
        let (start_year, start_month) = if today.day() >= CYCLE_ANCHOR_DAY {
            (today.year(), today.month())
        } else {
            previous_month(today.year(), today.month())
        };
        let (end_year, end_month) = next_month(start_year, start_month);

        Self {
            start: anchor_date(start_year, start_month),
            end: anchor_date(end_year, end_month),
        }
    }

    /// Returns true if `date` falls within this window, inclusive of
    /// both ends.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

impl std::fmt::Display for CycleWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Builds the anchor date for a year/month pair.
fn anchor_date(year: i32, month: Month) -> Date {
    // Every month has a 25th, so construction cannot fail.
    Date::from_calendar_date(year, month, CYCLE_ANCHOR_DAY).unwrap_or(Date::MIN)
}

/// Steps back one calendar month, adjusting the year across January.
fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        other => (year, other.previous()),
    }
}

/// Steps forward one calendar month, adjusting the year across December.
fn next_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::December => (year + 1, Month::January),
        other => (year, other.next()),
    }
}
