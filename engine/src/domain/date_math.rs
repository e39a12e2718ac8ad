//! Calendar-day arithmetic for due-date estimation.
//!
//! Everything here works on `chrono::NaiveDate`: plain calendar dates with
//! no time-of-day, so day differences can never pick up off-by-one drift
//! from daylight-saving transitions.

use chrono::{Duration, NaiveDate};
use shared::{GestationalAge, Trimester};

/// Add `days` (may be negative) to a date, handling month/year rollover and
/// leap years. Returns `None` if the result falls outside chrono's
/// representable range.
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// Signed whole-day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Split a total gestational day count into completed weeks plus extra days.
///
/// Negative totals are clamped to zero before splitting, so `weeks` is never
/// negative and `days` always lands in `[0, 6]`.
pub fn weeks_and_days(total_days: i64) -> GestationalAge {
    let total = total_days.max(0);
    GestationalAge {
        weeks: (total / 7) as u32,
        days: (total % 7) as u32,
    }
}

/// Classify completed gestational weeks into a trimester.
pub fn trimester_of(weeks: u32) -> Trimester {
    if weeks <= 12 {
        Trimester::First
    } else if weeks <= 26 {
        Trimester::Second
    } else {
        Trimester::Third
    }
}
