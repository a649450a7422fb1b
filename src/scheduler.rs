//! Crew-level scheduling queries.
//!
//! [`Scheduler`] ties the pure calculation stages to a validated
//! configuration: it resolves schedules, individual rest and responsibilities
//! for a crew on a date, and builds month-long planning views. It holds no
//! mutable state and clones cheaply, so one instance can be shared by every
//! request handler.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::calculation::{
    assign_responsibilities, cycle_position, resolve_duty, rest_slot, resting_member_index,
};
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{
    Crew, CrewDay, DaySchedule, MemberDuty, PlanningDay, RestAssignment, RestingMember,
};

/// Resolves the schedule of a crew on a date.
pub fn schedule_for(crew: &Crew, date: NaiveDate) -> DaySchedule {
    let position = cycle_position(crew.anchor_date, date, crew.cycle_length);
    let duty = resolve_duty(position.position, crew.work_days, crew.cycle_length);

    DaySchedule {
        crew_id: crew.id.clone(),
        date,
        cycle_number: position.cycle_number,
        position_in_cycle: position.position,
        duty_type: duty.duty_type,
        day_in_block: duty.day_in_block,
    }
}

/// Resolves the individual rest assignment for an already resolved schedule.
pub fn rest_for(crew: &Crew, schedule: &DaySchedule) -> RestAssignment {
    let slot_index = rest_slot(
        schedule.day_in_block,
        crew.rest_window_start_day,
        crew.work_days,
    );

    let resting = slot_index
        .and_then(|slot| resting_member_index(crew, schedule.cycle_number, slot))
        .and_then(|index| {
            crew.roster.get(index).map(|member| RestingMember {
                member_index: index,
                member_id: member.id.clone(),
                member_name: member.name.clone(),
            })
        });

    RestAssignment {
        crew_id: crew.id.clone(),
        date: schedule.date,
        slot_index,
        resting,
    }
}

/// Lists every date of a calendar month.
///
/// Rejects months outside 1-12. A year chrono cannot represent yields an
/// empty list rather than an error.
///
/// # Example
///
/// ```
/// use shift_rota::scheduler::month_dates;
///
/// assert_eq!(month_dates(2, 2026).unwrap().len(), 28);
/// assert_eq!(month_dates(2, 2028).unwrap().len(), 29);
/// assert!(month_dates(13, 2026).is_err());
/// assert!(month_dates(1, 1_000_000).unwrap().is_empty());
/// ```
pub fn month_dates(month: u32, year: i32) -> SchedulerResult<Vec<NaiveDate>> {
    if !(1..=12).contains(&month) {
        return Err(SchedulerError::InvalidDateRange { month, year });
    }

    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Ok(Vec::new());
    };

    Ok(first
        .iter_days()
        .take_while(|date| date.month() == month)
        .collect())
}

/// Scheduling queries over a shared configuration.
#[derive(Debug, Clone)]
pub struct Scheduler {
    config: Arc<SchedulerConfig>,
}

impl Scheduler {
    /// Creates a scheduler over a validated configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Returns every configured crew, ordered by id.
    pub fn crews(&self) -> &[Crew] {
        self.config.crews()
    }

    /// Looks up a crew by id.
    pub fn crew(&self, crew_id: &str) -> SchedulerResult<&Crew> {
        self.config
            .crew(crew_id)
            .ok_or_else(|| SchedulerError::CrewNotFound {
                crew_id: crew_id.to_string(),
            })
    }

    /// Looks up a member's crew and roster index.
    pub fn crew_for_member(&self, member_id: &str) -> SchedulerResult<(&Crew, usize)> {
        self.config
            .member(member_id)
            .ok_or_else(|| SchedulerError::MemberNotAssigned {
                member_id: member_id.to_string(),
            })
    }

    /// Resolves the duty of a crew on a date.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shift_rota::calculation::DutyType;
    /// use shift_rota::config::ConfigLoader;
    /// use shift_rota::scheduler::Scheduler;
    /// use chrono::NaiveDate;
    ///
    /// let scheduler = Scheduler::new(ConfigLoader::load("./config/noc")?.into_config());
    /// let date = NaiveDate::from_ymd_opt(2026, 2, 27).unwrap();
    /// let schedule = scheduler.resolve_schedule("A", date)?;
    /// assert_eq!(schedule.duty_type, DutyType::NightShift);
    /// # Ok::<(), shift_rota::error::SchedulerError>(())
    /// ```
    pub fn resolve_schedule(&self, crew_id: &str, date: NaiveDate) -> SchedulerResult<DaySchedule> {
        let crew = self.crew(crew_id)?;
        Ok(schedule_for(crew, date))
    }

    /// Resolves which member, if any, rests individually on a date.
    pub fn resolve_rest_assignment(
        &self,
        crew_id: &str,
        date: NaiveDate,
    ) -> SchedulerResult<RestAssignment> {
        let crew = self.crew(crew_id)?;
        Ok(rest_for(crew, &schedule_for(crew, date)))
    }

    /// Resolves every member's responsibility on a date.
    pub fn resolve_responsibilities(
        &self,
        crew_id: &str,
        date: NaiveDate,
    ) -> SchedulerResult<Vec<MemberDuty>> {
        let crew = self.crew(crew_id)?;
        Ok(self.crew_day(crew, date).members)
    }

    /// Builds the planning view of every crew for a calendar month.
    pub fn plan_month(&self, month: u32, year: i32) -> SchedulerResult<Vec<PlanningDay>> {
        let dates = month_dates(month, year)?;
        debug!(month, year, days = dates.len(), "Building month planning");

        Ok(dates
            .into_iter()
            .map(|date| PlanningDay {
                date,
                weekday: date.weekday(),
                crews: self
                    .crews()
                    .iter()
                    .map(|crew| self.crew_day(crew, date))
                    .collect(),
            })
            .collect())
    }

    fn crew_day(&self, crew: &Crew, date: NaiveDate) -> CrewDay {
        let schedule = schedule_for(crew, date);
        let rest = rest_for(crew, &schedule);
        let members = assign_responsibilities(
            &crew.roster,
            rest.resting.as_ref().map(|r| r.member_index),
            schedule.duty_type,
            &self.config.settings().responsibilities,
        );

        CrewDay {
            crew_id: crew.id.clone(),
            crew_name: crew.name.clone(),
            color_code: crew.color_code.clone(),
            duty_type: schedule.duty_type,
            day_in_block: schedule.day_in_block,
            members,
        }
    }
}
