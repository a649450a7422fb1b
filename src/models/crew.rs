//! Crew and crew member models.
//!
//! A [`Crew`] is a fixed-membership rotating team with an anchor date and a
//! rotation shape. Roster order is significant: it is the basis of both the
//! individual rest rotation and the responsibility assignment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A member of a crew roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Unique identifier for the member across all crews.
    pub id: String,
    /// The member's display name.
    pub name: String,
    /// Contact email, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Which rule picks the individually resting member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationRule {
    /// Look the member up in the crew's permutation table.
    #[default]
    PermutationTable,
    /// `((cycle - 1) * slots + slot) mod roster_len`, kept for comparison with
    /// planning sheets produced before the table was introduced.
    LegacyModulo,
}

/// A configured, validated crew.
///
/// Instances are produced by [`crate::config::ConfigLoader`], which guarantees
/// the rotation shape is consistent (non-zero cycle, even work block that fits
/// in the cycle, rest window inside the block, table rows matching the window).
///
/// # Example
///
/// ```
/// use shift_rota::models::{Crew, CrewMember, RotationRule};
/// use chrono::NaiveDate;
///
/// let member = |id: &str| CrewMember { id: id.to_string(), name: id.to_string(), email: None };
/// let crew = Crew {
///     id: "A".to_string(),
///     name: "Shift A".to_string(),
///     color_code: None,
///     anchor_date: NaiveDate::from_ymd_opt(2026, 2, 24).unwrap(),
///     cycle_length: 9,
///     work_days: 6,
///     rest_window_start_day: 4,
///     rotation_rule: RotationRule::PermutationTable,
///     rotation_table: vec![vec![0, 1, 2], vec![3, 0, 1], vec![2, 3, 0], vec![1, 2, 3]],
///     roster: vec![member("a"), member("b"), member("c"), member("d")],
/// };
/// assert_eq!(crew.rest_days(), 3);
/// assert_eq!(crew.rest_slot_count(), 3);
/// assert_eq!(crew.member_index("c"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crew {
    /// Unique identifier for the crew (e.g. "A").
    pub id: String,
    /// The crew's display name.
    pub name: String,
    /// Display colour used by planning views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    /// The first DAY_SHIFT date of cycle 1.
    pub anchor_date: NaiveDate,
    /// Total days in one cycle (work block plus collective rest).
    pub cycle_length: u32,
    /// Days in the work block; the first half are day shifts, the second night shifts.
    pub work_days: u32,
    /// First block day (1-based) on which one member rests individually.
    pub rest_window_start_day: u32,
    /// Which rule selects the resting member.
    pub rotation_rule: RotationRule,
    /// Permutation table rows; one row per cycle of the rotation period.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rotation_table: Vec<Vec<usize>>,
    /// Ordered roster.
    pub roster: Vec<CrewMember>,
}

impl Crew {
    /// Days of collective rest at the end of each cycle.
    pub fn rest_days(&self) -> u32 {
        self.cycle_length - self.work_days
    }

    /// Number of rotation-eligible days in each work block.
    pub fn rest_slot_count(&self) -> u32 {
        self.work_days + 1 - self.rest_window_start_day
    }

    /// Position of a member in the roster.
    pub fn member_index(&self, member_id: &str) -> Option<usize> {
        self.roster.iter().position(|m| m.id == member_id)
    }
}
