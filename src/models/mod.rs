//! Core data models for the shift rotation scheduler.
//!
//! This module contains the crew configuration models, the derived schedule
//! values and the persisted overtime records.

mod crew;
mod overtime;
mod schedule;

pub use crew::{Crew, CrewMember, RotationRule};
pub use overtime::{
    MonthlyOvertime, OvertimeLine, OvertimeRecord, OvertimeWindow, ShiftLabel,
};
pub use schedule::{CrewDay, DaySchedule, MemberDuty, PlanningDay, RestAssignment, RestingMember};
