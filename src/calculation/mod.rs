//! Scheduling calculations for rotating crews.
//!
//! This module contains the pure, stateless stages of the scheduler: cycle
//! position calculation, duty type resolution, individual rest rotation and
//! responsibility assignment. None of them can fail and none of them hold
//! state, so they are safe to call from any number of threads.

mod cycle_position;
mod duty_type;
mod responsibility;
mod rest_rotation;

pub use cycle_position::{CyclePosition, cycle_position};
pub use duty_type::{DutyResolution, DutyType, resolve_duty};
pub use responsibility::assign_responsibilities;
pub use rest_rotation::{
    is_balanced, sequential_rotation_table, resting_member_index, rest_slot, validate_rotation_table,
};
