//! In-memory audit-record repository for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::{AuditRecord, AuditView, Page, PageCursor, PageRequest, RecordId, RecordQuery},
    ports::{AuditRecordRepository, AuditRepositoryError, AuditRepositoryResult},
};

/// Scan key ordering rows the same way the store orders them.
type RecordKey = (i64, DateTime<Utc>, RecordId);

/// Thread-safe in-memory audit repository.
///
/// Keeps one ordered map per view so keyset pagination behaves identically
/// to the `PostgreSQL` adapter. Suitable for tests only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditRepository {
    state: Arc<RwLock<ViewMaps>>,
}

#[derive(Debug, Default)]
struct ViewMaps {
    by_interval: BTreeMap<RecordKey, AuditRecord>,
    by_user_interval: BTreeMap<RecordKey, AuditRecord>,
    by_user_subject_interval: BTreeMap<RecordKey, AuditRecord>,
}

impl ViewMaps {
    const fn rows(&self, view: AuditView) -> &BTreeMap<RecordKey, AuditRecord> {
        match view {
            AuditView::ByInterval => &self.by_interval,
            AuditView::ByUserInterval => &self.by_user_interval,
            AuditView::ByUserSubjectInterval => &self.by_user_subject_interval,
        }
    }

    const fn rows_mut(&mut self, view: AuditView) -> &mut BTreeMap<RecordKey, AuditRecord> {
        match view {
            AuditView::ByInterval => &mut self.by_interval,
            AuditView::ByUserInterval => &mut self.by_user_interval,
            AuditView::ByUserSubjectInterval => &mut self.by_user_subject_interval,
        }
    }
}

impl InMemoryAuditRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(query: &RecordQuery, key: &RecordKey, record: &AuditRecord) -> bool {
        let (bucket, occur_time, _) = key;
        let range = query.range();
        query.bucket_range().contains(bucket)
            && *occur_time >= range.from()
            && *occur_time <= range.to()
            && query.user().is_none_or(|user| record.user() == user)
            && query
                .subject()
                .is_none_or(|subject| record.subject() == subject)
    }

    fn after_cursor(cursor: Option<&PageCursor>, key: &RecordKey) -> bool {
        cursor.is_none_or(|c| *key > (c.bucket, c.occur_time, c.record_id))
    }
}

#[async_trait]
impl AuditRecordRepository for InMemoryAuditRepository {
    async fn store(&self, view: AuditView, record: &AuditRecord) -> AuditRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AuditRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let key = (
            view.bucket_of(record.occur_time()),
            record.occur_time(),
            record.id(),
        );
        state.rows_mut(view).insert(key, record.clone());
        Ok(())
    }

    async fn fetch(
        &self,
        query: &RecordQuery,
        page: &PageRequest,
    ) -> AuditRepositoryResult<Page<AuditRecord>> {
        let cursor = page.cursor()?;
        let fetch_size = page.fetch_size_or(PageRequest::DEFAULT_FETCH_SIZE);

        let state = self.state.read().map_err(|err| {
            AuditRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let records: Vec<AuditRecord> = state
            .rows(query.view())
            .iter()
            .filter(|(key, record)| {
                Self::after_cursor(cursor.as_ref(), key) && Self::matches(query, key, record)
            })
            .map(|(_, record)| record.clone())
            .take(fetch_size)
            .collect();

        Page::from_scan(query.view(), records, fetch_size).map_err(AuditRepositoryError::from)
    }
}
