//! Shift Rotation Scheduler for rotating operations crews
//!
//! This crate resolves, for any calendar date, which duty a crew works, which
//! crew member takes an individual rest day, which responsibilities the
//! remaining members hold, and how much overtime each member accrues per
//! month. Schedules are pure functions of the crew configuration and the
//! date; only overtime records are persisted.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod overtime;
pub mod scheduler;
