//! Configuration loading and management for the shift rotation scheduler.
//!
//! This module loads crew rotations and system settings from YAML files and
//! validates them once, so that every scheduling query can run without
//! failing.
//!
//! # Example
//!
//! ```no_run
//! use shift_rota::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/noc").unwrap();
//! for crew in loader.config().crews() {
//!     println!("{}: {} members", crew.name, crew.roster.len());
//! }
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CrewDefinition, OvertimeWindows, SchedulerConfig, SchedulerSettings};
