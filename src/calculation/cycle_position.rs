//! Cycle position calculation.
//!
//! Maps a target date onto a crew's repeating cycle. Dates before the anchor
//! are valid and resolve through the same modular arithmetic: the day before
//! the anchor is the last position of cycle 0.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a date falls inside a crew's rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CyclePosition {
    /// 1-based cycle number; zero or negative before the anchor.
    pub cycle_number: i64,
    /// Zero-based position in `[0, cycle_length)`.
    pub position: u32,
}

/// Computes the cycle number and position of `date` relative to `anchor`.
///
/// Uses floor division, so negative day differences land on the preceding
/// cycle rather than being truncated toward zero. `cycle_length` must be
/// non-zero; configuration loading rejects zero-length cycles.
///
/// # Example
///
/// ```
/// use shift_rota::calculation::cycle_position;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 2, 24).unwrap();
///
/// let first = cycle_position(anchor, anchor, 9);
/// assert_eq!((first.cycle_number, first.position), (1, 0));
///
/// let day_before = cycle_position(anchor, anchor.pred_opt().unwrap(), 9);
/// assert_eq!((day_before.cycle_number, day_before.position), (0, 8));
/// ```
pub fn cycle_position(anchor: NaiveDate, date: NaiveDate, cycle_length: u32) -> CyclePosition {
    debug_assert!(cycle_length > 0, "cycle_length must be positive");

    let days_diff = (date - anchor).num_days();
    let length = i64::from(cycle_length);

    CyclePosition {
        cycle_number: days_diff.div_euclid(length) + 1,
        position: days_diff.rem_euclid(length) as u32,
    }
}
