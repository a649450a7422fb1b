//! Overtime record models.
//!
//! This module contains the persisted [`OvertimeRecord`] and the
//! [`MonthlyOvertime`] aggregate returned by the accrual engine.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::DutyType;

/// Which shift an overtime record was accrued on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftLabel {
    /// Accrued on a day shift.
    Day,
    /// Accrued on a night shift.
    Night,
}

impl ShiftLabel {
    /// Returns the label for a duty type, or `None` for collective rest.
    ///
    /// # Example
    ///
    /// ```
    /// use shift_rota::calculation::DutyType;
    /// use shift_rota::models::ShiftLabel;
    ///
    /// assert_eq!(ShiftLabel::for_duty(DutyType::NightShift), Some(ShiftLabel::Night));
    /// assert_eq!(ShiftLabel::for_duty(DutyType::RestDay), None);
    /// ```
    pub fn for_duty(duty_type: DutyType) -> Option<Self> {
        match duty_type {
            DutyType::DayShift => Some(ShiftLabel::Day),
            DutyType::NightShift => Some(ShiftLabel::Night),
            DutyType::RestDay => None,
        }
    }
}

/// A clock window in which overtime is worked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeWindow {
    /// Start of the window.
    pub start: NaiveTime,
    /// End of the window.
    pub end: NaiveTime,
}

/// A persisted overtime entry.
///
/// At most one record exists per `(member_id, date)`. Once created, only the
/// approval metadata may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRecord {
    /// Record identifier.
    pub id: Uuid,
    /// The member the overtime is owed to.
    pub member_id: String,
    /// The worked date.
    pub date: NaiveDate,
    /// Overtime duration in minutes.
    pub duration_minutes: u32,
    /// Shift the overtime was accrued on.
    pub shift_label: ShiftLabel,
    /// Calendar month of `date` (1-12).
    pub month: u32,
    /// Calendar year of `date`.
    pub year: i32,
    /// Who approved the overtime, if anyone.
    pub approved_by: Option<String>,
    /// Free-form reason recorded with the approval.
    pub reason: Option<String>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
}

/// An overtime record as presented in a monthly statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeLine {
    /// The stored record.
    #[serde(flatten)]
    pub record: OvertimeRecord,
    /// Day of the week of the record date.
    pub weekday: Weekday,
    /// Clock windows the overtime covers.
    pub windows: Vec<OvertimeWindow>,
}

/// A member's overtime for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOvertime {
    /// The member identifier.
    pub member_id: String,
    /// The member display name.
    pub member_name: String,
    /// The member's crew identifier.
    pub crew_id: String,
    /// The member's crew display name.
    pub crew_name: String,
    /// Requested month (1-12).
    pub month: u32,
    /// Requested year.
    pub year: i32,
    /// Records sorted by date ascending.
    pub records: Vec<OvertimeLine>,
    /// Sum of `duration_minutes` over all records.
    pub total_minutes: u32,
    /// `total_minutes` expressed in hours.
    pub total_hours: Decimal,
    /// Number of records.
    pub total_days: u32,
}
