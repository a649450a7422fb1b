//! Overtime accrual and storage.
//!
//! - [`engine`] derives a member's owed overtime from the schedule and
//!   materializes it as records
//! - [`store`] defines the record store and its in-memory implementation

pub mod engine;
pub mod store;

pub use engine::{Entitlement, OvertimeEngine, entitlements};
pub use store::{InMemoryOvertimeStore, OvertimeStore};
