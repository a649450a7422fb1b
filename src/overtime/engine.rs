//! Overtime accrual engine.
//!
//! For a member and a calendar month, every date on which the member's crew
//! works and the member is not individually resting earns one fixed-duration
//! overtime entry. Entries are created lazily the first time the month is
//! requested and are never overwritten afterwards.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::{Crew, MonthlyOvertime, OvertimeLine, OvertimeRecord, ShiftLabel};
use crate::scheduler::{Scheduler, month_dates, rest_for, schedule_for};

use super::store::OvertimeStore;

/// A date on which a member is owed overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entitlement {
    /// The worked date.
    pub date: NaiveDate,
    /// The shift worked that date.
    pub shift_label: ShiftLabel,
}

/// Lists the dates in `dates` on which the member at `member_index` is owed
/// overtime.
///
/// # Example
///
/// ```no_run
/// use shift_rota::config::ConfigLoader;
/// use shift_rota::overtime::entitlements;
/// use shift_rota::scheduler::month_dates;
///
/// let loader = ConfigLoader::load("./config/noc")?;
/// let (crew, index) = loader.crew_for_member("alaine")?;
/// let owed = entitlements(crew, index, &month_dates(3, 2026)?);
/// assert_eq!(owed.len(), 17);
/// # Ok::<(), shift_rota::error::SchedulerError>(())
/// ```
pub fn entitlements(crew: &Crew, member_index: usize, dates: &[NaiveDate]) -> Vec<Entitlement> {
    dates
        .iter()
        .filter_map(|&date| {
            let schedule = schedule_for(crew, date);
            let shift_label = ShiftLabel::for_duty(schedule.duty_type)?;

            let resting = rest_for(crew, &schedule)
                .resting
                .is_some_and(|r| r.member_index == member_index);
            if resting {
                return None;
            }

            Some(Entitlement { date, shift_label })
        })
        .collect()
}

/// Creates and aggregates monthly overtime records.
#[derive(Clone)]
pub struct OvertimeEngine {
    scheduler: Scheduler,
    store: Arc<dyn OvertimeStore>,
}

impl OvertimeEngine {
    /// Creates an engine over a scheduler and a store.
    pub fn new(scheduler: Scheduler, store: Arc<dyn OvertimeStore>) -> Self {
        Self { scheduler, store }
    }

    /// Returns the scheduler the engine resolves schedules with.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Returns a member's overtime for a month, creating missing records.
    ///
    /// Uses the configured storage timeout for every storage call.
    pub async fn get_or_create_overtime_for_month(
        &self,
        member_id: &str,
        month: u32,
        year: i32,
    ) -> SchedulerResult<MonthlyOvertime> {
        let timeout = self.scheduler.config().settings().storage_timeout();
        self.get_or_create_with_timeout(member_id, month, year, timeout)
            .await
    }

    /// Returns a member's overtime for a month, creating missing records.
    ///
    /// Each storage call must finish within `timeout`; otherwise the request
    /// fails with a retryable [`SchedulerError::StorageUnavailable`]. Records
    /// already inserted before a failure stay in place and are picked up by
    /// the retry, so no partial result is ever returned.
    pub async fn get_or_create_with_timeout(
        &self,
        member_id: &str,
        month: u32,
        year: i32,
        timeout: Duration,
    ) -> SchedulerResult<MonthlyOvertime> {
        let dates = month_dates(month, year)?;
        let (crew, member_index) = self.scheduler.crew_for_member(member_id)?;
        let settings = self.scheduler.config().settings();

        let owed = entitlements(crew, member_index, &dates);

        let existing = self
            .with_timeout(timeout, "list_month", self.store.list_month(member_id, month, year))
            .await?;

        let mut created = 0usize;
        for entitlement in owed
            .iter()
            .filter(|e| !existing.iter().any(|r| r.date == e.date))
        {
            let record = OvertimeRecord {
                id: Uuid::new_v4(),
                member_id: member_id.to_string(),
                date: entitlement.date,
                duration_minutes: settings.overtime_minutes_per_worked_day,
                shift_label: entitlement.shift_label,
                month,
                year,
                approved_by: None,
                reason: None,
                created_at: Utc::now(),
            };

            match self
                .with_timeout(timeout, "insert", self.store.insert(record))
                .await
            {
                Ok(()) => created += 1,
                Err(SchedulerError::StorageConflict { member_id, date }) => {
                    debug!(
                        member_id = %member_id,
                        date = %date,
                        "Overtime record created concurrently, re-reading"
                    );
                    let stored = self
                        .with_timeout(timeout, "find", self.store.find(&member_id, date))
                        .await?;
                    if stored.is_none() {
                        warn!(
                            member_id = %member_id,
                            date = %date,
                            "Store reported a conflict but holds no record"
                        );
                        return Err(SchedulerError::StorageUnavailable {
                            message: format!(
                                "conflicting record for '{}' on {} could not be read back",
                                member_id, date
                            ),
                        });
                    }
                }
                Err(err) => {
                    warn!(member_id = %member_id, error = %err, "Overtime insert failed");
                    return Err(err);
                }
            }
        }

        let records = self
            .with_timeout(timeout, "list_month", self.store.list_month(member_id, month, year))
            .await?;

        info!(
            member_id = %member_id,
            crew_id = %crew.id,
            month,
            year,
            created,
            records = records.len(),
            "Overtime month resolved"
        );

        Ok(self.summarize(crew, member_index, month, year, records))
    }

    /// Records who approved a member's overtime on a date.
    pub async fn approve_overtime(
        &self,
        member_id: &str,
        date: NaiveDate,
        approved_by: String,
        reason: Option<String>,
    ) -> SchedulerResult<OvertimeRecord> {
        self.scheduler.crew_for_member(member_id)?;
        let timeout = self.scheduler.config().settings().storage_timeout();

        let record = self
            .with_timeout(
                timeout,
                "set_approval",
                self.store.set_approval(member_id, date, approved_by, reason),
            )
            .await?;

        info!(
            member_id = %member_id,
            date = %date,
            approved_by = ?record.approved_by,
            "Overtime approved"
        );
        Ok(record)
    }

    fn summarize(
        &self,
        crew: &Crew,
        member_index: usize,
        month: u32,
        year: i32,
        mut records: Vec<OvertimeRecord>,
    ) -> MonthlyOvertime {
        records.sort_by_key(|r| r.date);

        let windows = &self.scheduler.config().settings().overtime_windows;
        let total_minutes: u32 = records.iter().map(|r| r.duration_minutes).sum();
        let total_days = records.len() as u32;
        let member = &crew.roster[member_index];

        MonthlyOvertime {
            member_id: member.id.clone(),
            member_name: member.name.clone(),
            crew_id: crew.id.clone(),
            crew_name: crew.name.clone(),
            month,
            year,
            records: records
                .into_iter()
                .map(|record| OvertimeLine {
                    weekday: record.date.weekday(),
                    windows: windows.for_label(record.shift_label).to_vec(),
                    record,
                })
                .collect(),
            total_minutes,
            total_hours: Decimal::from(total_minutes) / Decimal::from(60),
            total_days,
        }
    }

    async fn with_timeout<T>(
        &self,
        timeout: Duration,
        operation: &str,
        call: impl Future<Output = SchedulerResult<T>>,
    ) -> SchedulerResult<T> {
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = timeout.as_millis() as u64,
                    "Overtime storage call timed out"
                );
                Err(SchedulerError::StorageUnavailable {
                    message: format!(
                        "{} timed out after {}ms",
                        operation,
                        timeout.as_millis()
                    ),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::overtime::InMemoryOvertimeStore;
    use async_trait::async_trait;
    use std::str::FromStr;

    fn scheduler() -> Scheduler {
        Scheduler::new(ConfigLoader::load("./config/noc").unwrap().into_config())
    }

    fn engine() -> (OvertimeEngine, Arc<InMemoryOvertimeStore>) {
        let store = Arc::new(InMemoryOvertimeStore::new());
        (OvertimeEngine::new(scheduler(), store.clone()), store)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// Store that never answers in time.
    struct StalledStore;

    #[async_trait]
    impl OvertimeStore for StalledStore {
        async fn insert(&self, _record: OvertimeRecord) -> SchedulerResult<()> {
            std::future::pending().await
        }

        async fn find(
            &self,
            _member_id: &str,
            _date: NaiveDate,
        ) -> SchedulerResult<Option<OvertimeRecord>> {
            std::future::pending().await
        }

        async fn list_month(
            &self,
            _member_id: &str,
            _month: u32,
            _year: i32,
        ) -> SchedulerResult<Vec<OvertimeRecord>> {
            std::future::pending().await
        }

        async fn set_approval(
            &self,
            _member_id: &str,
            _date: NaiveDate,
            _approved_by: String,
            _reason: Option<String>,
        ) -> SchedulerResult<OvertimeRecord> {
            std::future::pending().await
        }
    }

    /// Store whose first listing hides existing records, forcing every insert
    /// into the conflict path.
    struct StaleListingStore {
        inner: InMemoryOvertimeStore,
        listings: tokio::sync::Mutex<u32>,
    }

    #[async_trait]
    impl OvertimeStore for StaleListingStore {
        async fn insert(&self, record: OvertimeRecord) -> SchedulerResult<()> {
            self.inner.insert(record).await
        }

        async fn find(
            &self,
            member_id: &str,
            date: NaiveDate,
        ) -> SchedulerResult<Option<OvertimeRecord>> {
            self.inner.find(member_id, date).await
        }

        async fn list_month(
            &self,
            member_id: &str,
            month: u32,
            year: i32,
        ) -> SchedulerResult<Vec<OvertimeRecord>> {
            let mut listings = self.listings.lock().await;
            *listings += 1;
            if *listings == 1 {
                return Ok(Vec::new());
            }
            self.inner.list_month(member_id, month, year).await
        }

        async fn set_approval(
            &self,
            member_id: &str,
            date: NaiveDate,
            approved_by: String,
            reason: Option<String>,
        ) -> SchedulerResult<OvertimeRecord> {
            self.inner
                .set_approval(member_id, date, approved_by, reason)
                .await
        }
    }

    /// Store that rejects every insert as a duplicate while holding nothing.
    struct PhantomConflictStore;

    #[async_trait]
    impl OvertimeStore for PhantomConflictStore {
        async fn insert(&self, record: OvertimeRecord) -> SchedulerResult<()> {
            Err(SchedulerError::StorageConflict {
                member_id: record.member_id,
                date: record.date,
            })
        }

        async fn find(
            &self,
            _member_id: &str,
            _date: NaiveDate,
        ) -> SchedulerResult<Option<OvertimeRecord>> {
            Ok(None)
        }

        async fn list_month(
            &self,
            _member_id: &str,
            _month: u32,
            _year: i32,
        ) -> SchedulerResult<Vec<OvertimeRecord>> {
            Ok(Vec::new())
        }

        async fn set_approval(
            &self,
            member_id: &str,
            date: NaiveDate,
            _approved_by: String,
            _reason: Option<String>,
        ) -> SchedulerResult<OvertimeRecord> {
            Err(SchedulerError::RecordNotFound {
                member_id: member_id.to_string(),
                date,
            })
        }
    }

    #[test]
    fn test_entitlements_exclude_rest_days_and_individual_rest() {
        let s = scheduler();
        let (crew, index) = s.crew_for_member("alaine").unwrap();
        let owed = entitlements(crew, index, &month_dates(3, 2026).unwrap());

        assert_eq!(owed.len(), 17);
        assert!(owed.iter().all(|e| e.date != date(2026, 3, 9)));
        assert!(owed.iter().all(|e| e.date != date(2026, 3, 19)));
        assert!(owed.iter().all(|e| e.date != date(2026, 3, 12)));
    }

    #[test]
    fn test_entitlement_labels_follow_duty_type() {
        let s = scheduler();
        let (crew, index) = s.crew_for_member("luca").unwrap();
        let owed = entitlements(crew, index, &[date(2026, 3, 5), date(2026, 3, 9)]);

        assert_eq!(
            owed,
            vec![
                Entitlement {
                    date: date(2026, 3, 5),
                    shift_label: ShiftLabel::Day
                },
                Entitlement {
                    date: date(2026, 3, 9),
                    shift_label: ShiftLabel::Night
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_month_totals() {
        let (engine, _) = engine();
        let result = engine
            .get_or_create_overtime_for_month("alaine", 3, 2026)
            .await
            .unwrap();

        assert_eq!(result.crew_id, "A");
        assert_eq!(result.total_days, 17);
        assert_eq!(result.total_minutes, 17 * 120);
        assert_eq!(result.total_hours, dec("34"));
        assert!(result.records.windows(2).all(|w| w[0].record.date < w[1].record.date));
    }

    #[tokio::test]
    async fn test_resting_member_accrues_nothing_while_crew_mates_do() {
        let (engine, _) = engine();
        let rest_day = date(2026, 3, 19);

        for (member_id, expect_record) in [
            ("alaine", false),
            ("casimir", true),
            ("jose", true),
            ("luca", true),
        ] {
            let result = engine
                .get_or_create_overtime_for_month(member_id, 3, 2026)
                .await
                .unwrap();
            let on_day: Vec<_> = result
                .records
                .iter()
                .filter(|line| line.record.date == rest_day)
                .collect();

            if expect_record {
                assert_eq!(on_day.len(), 1, "{}", member_id);
                assert_eq!(on_day[0].record.duration_minutes, 120);
                assert_eq!(on_day[0].record.shift_label, ShiftLabel::Night);
            } else {
                assert!(on_day.is_empty(), "{}", member_id);
            }
        }
    }

    #[tokio::test]
    async fn test_second_call_returns_the_same_records() {
        let (engine, store) = engine();

        let first = engine
            .get_or_create_overtime_for_month("jose", 3, 2026)
            .await
            .unwrap();
        let stored = store.len().await;
        let second = engine
            .get_or_create_overtime_for_month("jose", 3, 2026)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(store.len().await, stored);
        assert_eq!(second.total_days, 16);
    }

    #[tokio::test]
    async fn test_concurrent_requests_converge() {
        let (engine, store) = engine();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let engine = engine.clone();
                tokio::spawn(async move {
                    engine
                        .get_or_create_overtime_for_month("casimir", 3, 2026)
                        .await
                })
            })
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(store.len().await, 17);
        assert!(results.iter().all(|r| r.records == results[0].records));
    }

    #[tokio::test]
    async fn test_conflicting_insert_is_recovered() {
        let inner = InMemoryOvertimeStore::new();
        let store = Arc::new(StaleListingStore {
            inner,
            listings: tokio::sync::Mutex::new(0),
        });
        let engine = OvertimeEngine::new(scheduler(), store.clone());

        let first = engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap();
        // the second listing is hidden, so every insert conflicts
        *store.listings.lock().await = 0;
        let second = engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(second.total_days, 16);
    }

    #[tokio::test]
    async fn test_conflict_without_stored_record_fails_retryably() {
        let engine = OvertimeEngine::new(scheduler(), Arc::new(PhantomConflictStore));
        let err = engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulerError::StorageUnavailable { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_unknown_member_is_not_configured() {
        let (engine, store) = engine();
        let result = engine
            .get_or_create_overtime_for_month("ghost", 3, 2026)
            .await;

        assert!(matches!(
            result,
            Err(SchedulerError::MemberNotAssigned { .. })
        ));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_invalid_month_is_rejected() {
        let (engine, _) = engine();
        assert!(matches!(
            engine.get_or_create_overtime_for_month("jose", 13, 2026).await,
            Err(SchedulerError::InvalidDateRange { month: 13, year: 2026 })
        ));
    }

    #[tokio::test]
    async fn test_unrepresentable_year_is_empty() {
        let (engine, _) = engine();
        let result = engine
            .get_or_create_overtime_for_month("jose", 1, 1_000_000)
            .await
            .unwrap();

        assert!(result.records.is_empty());
        assert_eq!(result.total_minutes, 0);
        assert_eq!(result.total_hours, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_month_before_anchor_still_accrues() {
        let (engine, _) = engine();
        let result = engine
            .get_or_create_overtime_for_month("alaine", 1, 2026)
            .await
            .unwrap();
        assert!(result.total_days > 0);
    }

    #[tokio::test]
    async fn test_storage_timeout_is_retryable() {
        let engine = OvertimeEngine::new(scheduler(), Arc::new(StalledStore));
        let err = engine
            .get_or_create_with_timeout("jose", 3, 2026, Duration::from_millis(10))
            .await
            .unwrap_err();

        assert!(matches!(err, SchedulerError::StorageUnavailable { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_records_carry_windows_and_weekday() {
        let (engine, _) = engine();
        let result = engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap();

        let first = &result.records[0];
        // 2026-03-01 is a Sunday night shift
        assert_eq!(first.record.date, date(2026, 3, 1));
        assert_eq!(first.weekday, chrono::Weekday::Sun);
        assert_eq!(first.windows.len(), 2);
    }

    #[tokio::test]
    async fn test_approve_overtime() {
        let (engine, _) = engine();
        engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap();

        let approved = engine
            .approve_overtime(
                "luca",
                date(2026, 3, 5),
                "supervisor".to_string(),
                Some("NOC supervision".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(approved.approved_by.as_deref(), Some("supervisor"));

        let again = engine
            .get_or_create_overtime_for_month("luca", 3, 2026)
            .await
            .unwrap();
        let line = again
            .records
            .iter()
            .find(|l| l.record.date == date(2026, 3, 5))
            .unwrap();
        assert_eq!(line.record.approved_by.as_deref(), Some("supervisor"));
    }

    #[tokio::test]
    async fn test_approve_overtime_without_record() {
        let (engine, _) = engine();
        assert!(matches!(
            engine
                .approve_overtime("luca", date(2026, 3, 5), "supervisor".to_string(), None)
                .await,
            Err(SchedulerError::RecordNotFound { .. })
        ));
    }
}
