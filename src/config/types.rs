//! Configuration types for the scheduler.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`SchedulerConfig`] the rest of the crate consumes.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::models::{Crew, CrewMember, OvertimeWindow, RotationRule, ShiftLabel};

fn default_overtime_minutes() -> u32 {
    120
}

fn default_responsibilities() -> Vec<String> {
    [
        "primary_contact",
        "monitoring",
        "reporting_primary",
        "reporting_secondary",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_storage_timeout_ms() -> u64 {
    2_000
}

fn default_cycle_length() -> u32 {
    9
}

fn default_work_days() -> u32 {
    6
}

fn window(start: (u32, u32), end: (u32, u32)) -> Option<OvertimeWindow> {
    Some(OvertimeWindow {
        start: NaiveTime::from_hms_opt(start.0, start.1, 0)?,
        end: NaiveTime::from_hms_opt(end.0, end.1, 0)?,
    })
}

/// Clock windows in which overtime is worked, per shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeWindows {
    /// Windows on day shifts.
    pub day: Vec<OvertimeWindow>,
    /// Windows on night shifts.
    pub night: Vec<OvertimeWindow>,
}

impl Default for OvertimeWindows {
    fn default() -> Self {
        Self {
            day: [window((7, 0), (8, 0)), window((18, 0), (19, 0))]
                .into_iter()
                .flatten()
                .collect(),
            night: [window((18, 0), (19, 0)), window((6, 0), (7, 0))]
                .into_iter()
                .flatten()
                .collect(),
        }
    }
}

impl OvertimeWindows {
    /// Returns the windows for a shift label.
    pub fn for_label(&self, label: ShiftLabel) -> &[OvertimeWindow] {
        match label {
            ShiftLabel::Day => &self.day,
            ShiftLabel::Night => &self.night,
        }
    }
}

/// System-wide settings from `scheduler.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSettings {
    /// Overtime minutes owed for every worked, non-resting day.
    #[serde(default = "default_overtime_minutes")]
    pub overtime_minutes_per_worked_day: u32,
    /// Responsibility labels, assigned in roster order.
    #[serde(default = "default_responsibilities")]
    pub responsibilities: Vec<String>,
    /// Default timeout for each overtime storage call.
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,
    /// Overtime clock windows per shift.
    #[serde(default)]
    pub overtime_windows: OvertimeWindows,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            overtime_minutes_per_worked_day: default_overtime_minutes(),
            responsibilities: default_responsibilities(),
            storage_timeout_ms: default_storage_timeout_ms(),
            overtime_windows: OvertimeWindows::default(),
        }
    }
}

impl SchedulerSettings {
    /// Returns the storage timeout as a [`Duration`].
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}

/// A crew as written in `crews/*.yaml`, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewDefinition {
    /// Unique identifier for the crew.
    pub id: String,
    /// The crew's display name.
    pub name: String,
    /// Display colour.
    #[serde(default)]
    pub color_code: Option<String>,
    /// The first DAY_SHIFT date of cycle 1.
    pub anchor_date: NaiveDate,
    /// Total days in one cycle.
    #[serde(default = "default_cycle_length")]
    pub cycle_length: u32,
    /// Days in the work block.
    #[serde(default = "default_work_days")]
    pub work_days: u32,
    /// First block day of the individual rest window; defaults to the
    /// first night shift.
    #[serde(default)]
    pub rest_window_start_day: Option<u32>,
    /// Rule used to pick the resting member.
    #[serde(default)]
    pub rotation_rule: RotationRule,
    /// Hand-authored permutation table; generated when absent.
    #[serde(default)]
    pub rotation_table: Option<Vec<Vec<usize>>>,
    /// Ordered roster.
    pub roster: Vec<CrewMember>,
}

/// The complete, validated scheduler configuration.
///
/// Built only by [`crate::config::ConfigLoader`]. Re-anchoring a crew means
/// loading a new configuration, never mutating this one.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    settings: SchedulerSettings,
    /// Crews sorted by id.
    crews: Vec<Crew>,
    /// Member id to (crew index, roster index).
    members: HashMap<String, (usize, usize)>,
}

impl SchedulerConfig {
    pub(super) fn new(
        settings: SchedulerSettings,
        crews: Vec<Crew>,
        members: HashMap<String, (usize, usize)>,
    ) -> Self {
        Self {
            settings,
            crews,
            members,
        }
    }

    /// Returns the system settings.
    pub fn settings(&self) -> &SchedulerSettings {
        &self.settings
    }

    /// Returns every crew, ordered by id.
    pub fn crews(&self) -> &[Crew] {
        &self.crews
    }

    /// Looks up a crew by id.
    pub fn crew(&self, crew_id: &str) -> Option<&Crew> {
        self.crews.iter().find(|c| c.id == crew_id)
    }

    /// Looks up a member's crew and roster index.
    pub fn member(&self, member_id: &str) -> Option<(&Crew, usize)> {
        self.members
            .get(member_id)
            .map(|&(crew_index, member_index)| (&self.crews[crew_index], member_index))
    }
}
