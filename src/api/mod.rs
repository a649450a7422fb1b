//! HTTP API module for the shift rotation scheduler.
//!
//! This module exposes the scheduling queries and the monthly overtime
//! statement as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApprovalRequest, DateQuery, MonthQuery, OvertimeQuery};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
