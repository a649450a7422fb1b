//! Derived per-date schedule values.
//!
//! Nothing in this module is ever persisted; every value is re-derivable from
//! the crew configuration and a date.

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calculation::DutyType;

/// The resolved schedule of one crew on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The crew the schedule belongs to.
    pub crew_id: String,
    /// The date resolved.
    pub date: NaiveDate,
    /// 1-based cycle number; zero or negative before the anchor date.
    pub cycle_number: i64,
    /// Zero-based position inside the cycle.
    pub position_in_cycle: u32,
    /// Duty type for the date.
    pub duty_type: DutyType,
    /// 1-based day inside the work block, 0 on collective rest days.
    pub day_in_block: u32,
}

/// The member on individual rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingMember {
    /// Index of the member in the crew roster.
    pub member_index: usize,
    /// The member's identifier.
    pub member_id: String,
    /// The member's display name.
    pub member_name: String,
}

/// The individual rest assignment of a crew on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestAssignment {
    /// The crew the assignment belongs to.
    pub crew_id: String,
    /// The date resolved.
    pub date: NaiveDate,
    /// Index of the rotation slot, when the date falls in the rest window.
    pub slot_index: Option<u32>,
    /// The resting member, or `None` when nobody rests individually.
    pub resting: Option<RestingMember>,
}

/// A member's duty on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDuty {
    /// The member's identifier.
    pub member_id: String,
    /// The member's display name.
    pub member_name: String,
    /// The responsibility label held that day, if any.
    pub responsibility: Option<String>,
    /// Whether the member is on individual rest.
    pub is_resting: bool,
}

/// One crew's row in a planning day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewDay {
    /// The crew identifier.
    pub crew_id: String,
    /// The crew display name.
    pub crew_name: String,
    /// Display colour of the crew.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_code: Option<String>,
    /// Duty type of the crew that day.
    pub duty_type: DutyType,
    /// 1-based block day, 0 on rest days.
    pub day_in_block: u32,
    /// Per-member duties, in roster order.
    pub members: Vec<MemberDuty>,
}

/// All crews on a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningDay {
    /// The date.
    pub date: NaiveDate,
    /// Day of the week.
    pub weekday: Weekday,
    /// One entry per configured crew, ordered by crew id.
    pub crews: Vec<CrewDay>,
}
