//! Overtime record storage.
//!
//! The [`OvertimeStore`] trait abstracts the persistence layer. Implementations
//! must enforce uniqueness on `(member_id, date)`: inserting a record whose key
//! already exists fails with [`SchedulerError::StorageConflict`] and leaves the
//! stored record untouched.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::error::{SchedulerError, SchedulerResult};
use crate::models::OvertimeRecord;

/// Persistence interface for overtime records.
#[async_trait]
pub trait OvertimeStore: Send + Sync {
    /// Inserts a record unless one already exists for its `(member_id, date)`.
    async fn insert(&self, record: OvertimeRecord) -> SchedulerResult<()>;

    /// Fetches the record of a member on a date.
    async fn find(&self, member_id: &str, date: NaiveDate)
    -> SchedulerResult<Option<OvertimeRecord>>;

    /// Lists a member's records for a month, ordered by date ascending.
    async fn list_month(
        &self,
        member_id: &str,
        month: u32,
        year: i32,
    ) -> SchedulerResult<Vec<OvertimeRecord>>;

    /// Sets approval metadata on an existing record and returns the update.
    async fn set_approval(
        &self,
        member_id: &str,
        date: NaiveDate,
        approved_by: String,
        reason: Option<String>,
    ) -> SchedulerResult<OvertimeRecord>;
}

/// In-process store keyed by `(member_id, date)`.
///
/// The write lock is held only across the check-then-insert of a single
/// record, which makes concurrent inserts of the same key race-free.
#[derive(Debug, Default)]
pub struct InMemoryOvertimeStore {
    records: RwLock<BTreeMap<(String, NaiveDate), OvertimeRecord>>,
}

impl InMemoryOvertimeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl OvertimeStore for InMemoryOvertimeStore {
    async fn insert(&self, record: OvertimeRecord) -> SchedulerResult<()> {
        let mut records = self.records.write().await;
        let key = (record.member_id.clone(), record.date);

        if records.contains_key(&key) {
            return Err(SchedulerError::StorageConflict {
                member_id: record.member_id,
                date: record.date,
            });
        }

        records.insert(key, record);
        Ok(())
    }

    async fn find(
        &self,
        member_id: &str,
        date: NaiveDate,
    ) -> SchedulerResult<Option<OvertimeRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&(member_id.to_string(), date)).cloned())
    }

    async fn list_month(
        &self,
        member_id: &str,
        month: u32,
        year: i32,
    ) -> SchedulerResult<Vec<OvertimeRecord>> {
        let records = self.records.read().await;
        let from = (member_id.to_string(), NaiveDate::MIN);
        let to = (member_id.to_string(), NaiveDate::MAX);

        Ok(records
            .range(from..=to)
            .map(|(_, record)| record)
            .filter(|record| record.month == month && record.year == year)
            .cloned()
            .collect())
    }

    async fn set_approval(
        &self,
        member_id: &str,
        date: NaiveDate,
        approved_by: String,
        reason: Option<String>,
    ) -> SchedulerResult<OvertimeRecord> {
        let mut records = self.records.write().await;

        let record = records
            .get_mut(&(member_id.to_string(), date))
            .ok_or_else(|| SchedulerError::RecordNotFound {
                member_id: member_id.to_string(),
                date,
            })?;

        record.approved_by = Some(approved_by);
        record.reason = reason;
        Ok(record.clone())
    }
}
