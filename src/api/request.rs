//! Request types for the scheduler API.
//!
//! Query-string parameters of the read endpoints and the JSON body of the
//! approval endpoint.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// `?date=YYYY-MM-DD` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateQuery {
    /// The date to resolve.
    pub date: NaiveDate,
}

/// `?month=M&year=Y` query; missing fields default to the current UTC month.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Calendar month (1-12).
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl MonthQuery {
    /// Resolves the requested month and year against today's UTC date.
    pub fn resolve(&self) -> (u32, i32) {
        resolve_month(self.month, self.year, Utc::now().date_naive())
    }
}

/// `?member_id=ID&month=M&year=Y` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeQuery {
    /// The member to report on.
    pub member_id: String,
    /// Calendar month (1-12); defaults to the current month.
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year; defaults to the current year.
    #[serde(default)]
    pub year: Option<i32>,
}

impl OvertimeQuery {
    /// Resolves the requested month and year against today's UTC date.
    pub fn resolve(&self) -> (u32, i32) {
        resolve_month(self.month, self.year, Utc::now().date_naive())
    }
}

/// Request body for `POST /overtime/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// The member whose record is approved.
    pub member_id: String,
    /// The date of the record.
    pub date: NaiveDate,
    /// Who approves it.
    pub approved_by: String,
    /// Optional free-form reason.
    #[serde(default)]
    pub reason: Option<String>,
}

fn resolve_month(month: Option<u32>, year: Option<i32>, today: NaiveDate) -> (u32, i32) {
    (
        month.unwrap_or_else(|| today.month()),
        year.unwrap_or_else(|| today.year()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_month_and_year_default_to_today() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 19).unwrap();
        assert_eq!(resolve_month(None, None, today), (3, 2026));
        assert_eq!(resolve_month(Some(7), None, today), (7, 2026));
        assert_eq!(resolve_month(Some(1), Some(2027), today), (1, 2027));
    }

    #[test]
    fn test_approval_reason_is_optional() {
        let request: ApprovalRequest = serde_json::from_str(
            r#"{"member_id": "luca", "date": "2026-03-05", "approved_by": "supervisor"}"#,
        )
        .unwrap();
        assert_eq!(request.member_id, "luca");
        assert!(request.reason.is_none());
    }
}
