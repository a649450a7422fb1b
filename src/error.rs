//! Error types for the shift rotation scheduler.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the scheduler can report. Pure scheduling functions never
//! fail; errors come from configuration loading, lookups of unknown crews or
//! members, malformed month requests and the overtime store.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the scheduler.
///
/// # Example
///
/// ```
/// use shift_rota::error::SchedulerError;
///
/// let error = SchedulerError::CrewNotFound {
///     crew_id: "Z".to_string(),
/// };
/// assert_eq!(error.to_string(), "Crew not found: Z");
/// assert!(!error.is_retryable());
/// ```
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but describes an impossible rotation.
    #[error("Invalid configuration for '{subject}': {message}")]
    InvalidConfig {
        /// The crew or setting the problem belongs to.
        subject: String,
        /// A description of what is wrong.
        message: String,
    },

    /// No crew with the given identifier is configured.
    #[error("Crew not found: {crew_id}")]
    CrewNotFound {
        /// The crew identifier that was requested.
        crew_id: String,
    },

    /// The member exists in no crew roster.
    #[error("Member '{member_id}' is not assigned to any crew")]
    MemberNotAssigned {
        /// The member identifier that was requested.
        member_id: String,
    },

    /// A month/year pair that does not name a calendar month.
    #[error("Invalid date range: month {month}, year {year}")]
    InvalidDateRange {
        /// The requested month (expected 1-12).
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// No overtime record exists for the member on that date.
    #[error("No overtime record for member '{member_id}' on {date}")]
    RecordNotFound {
        /// The member identifier.
        member_id: String,
        /// The date of the missing record.
        date: NaiveDate,
    },

    /// A concurrent writer inserted the same `(member, date)` record first.
    #[error("Overtime record for member '{member_id}' on {date} already exists")]
    StorageConflict {
        /// The member identifier.
        member_id: String,
        /// The date of the conflicting record.
        date: NaiveDate,
    },

    /// The overtime store could not be reached or timed out.
    #[error("Overtime storage unavailable: {message}")]
    StorageUnavailable {
        /// A description of the storage failure.
        message: String,
    },
}

impl SchedulerError {
    /// Returns true if the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SchedulerError::StorageUnavailable { .. })
    }
}

/// A type alias for Results that return SchedulerError.
pub type SchedulerResult<T> = Result<T, SchedulerError>;
