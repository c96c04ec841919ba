//! Repository port for denormalized audit-record persistence and lookup.

use crate::audit::domain::{
    AuditRecord, AuditView, Page, PageRequest, PagingStateError, RecordQuery,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit repository operations.
pub type AuditRepositoryResult<T> = Result<T, AuditRepositoryError>;

/// Audit-record persistence contract.
///
/// One saved message is stored once per view; implementations keep the rows
/// of each view ordered by `(bucket, occur_time, id)` so keyset pagination
/// is stable across requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditRecordRepository: Send + Sync {
    /// Stores one denormalized row for the given view.
    ///
    /// # Errors
    ///
    /// Returns [`AuditRepositoryError::Persistence`] when the write fails.
    async fn store(&self, view: AuditView, record: &AuditRecord) -> AuditRepositoryResult<()>;

    /// Fetches one page of records matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`AuditRepositoryError::InvalidPagingState`] when the
    /// request carries a token that does not decode, or
    /// [`AuditRepositoryError::Persistence`] when the scan fails.
    async fn fetch(
        &self,
        query: &RecordQuery,
        page: &PageRequest,
    ) -> AuditRepositoryResult<Page<AuditRecord>>;
}

/// Errors returned by audit repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AuditRepositoryError {
    /// The supplied continuation token is corrupt or stale.
    #[error(transparent)]
    InvalidPagingState(#[from] PagingStateError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuditRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
