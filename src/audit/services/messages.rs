//! Service layer for saving audit messages and querying the read models.

use crate::audit::{
    domain::{
        AuditDomainError, AuditMessage, AuditRecord, AuditView, Page, PageRequest, Payload,
        PayloadId, RecordQuery, TimeRange,
    },
    ports::{
        AuditRecordRepository, AuditRepositoryError, PayloadRepository, PayloadRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for audit message operations.
#[derive(Debug, Error)]
pub enum AuditServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AuditDomainError),
    /// Audit-record repository operation failed.
    #[error(transparent)]
    Repository(#[from] AuditRepositoryError),
    /// Payload repository operation failed.
    #[error(transparent)]
    Payload(#[from] PayloadRepositoryError),
}

/// Result type for audit service operations.
pub type AuditServiceResult<T> = Result<T, AuditServiceError>;

/// Audit message persistence and query orchestration.
///
/// Saving fans one message out into the three read models plus the payload
/// side-table. The fan-out is not transactional: a failure part-way leaves
/// the earlier replicas in place and is propagated as-is.
#[derive(Clone)]
pub struct AuditMessageService<R, P, C>
where
    R: AuditRecordRepository,
    P: PayloadRepository,
    C: Clock + Send + Sync,
{
    records: Arc<R>,
    payloads: Arc<P>,
    clock: Arc<C>,
    default_fetch_size: usize,
}

impl<R, P, C> AuditMessageService<R, P, C>
where
    R: AuditRecordRepository,
    P: PayloadRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new audit message service.
    #[must_use]
    pub const fn new(records: Arc<R>, payloads: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            records,
            payloads,
            clock,
            default_fetch_size: PageRequest::DEFAULT_FETCH_SIZE,
        }
    }

    /// Overrides the fetch size applied when a request does not set one.
    #[must_use]
    pub const fn with_default_fetch_size(mut self, fetch_size: usize) -> Self {
        self.default_fetch_size = fetch_size;
        self
    }

    /// Persists a message into the payload side-table and all three lookup
    /// tables.
    ///
    /// Returns the denormalized record shared by the three replicas.
    ///
    /// # Errors
    ///
    /// Returns [`AuditServiceError::Payload`] or
    /// [`AuditServiceError::Repository`] when a write fails; earlier
    /// fan-out writes are not rolled back.
    pub async fn save(&self, message: &AuditMessage) -> AuditServiceResult<AuditRecord> {
        let payload_id = PayloadId::new();
        let payload = Payload::new(payload_id, message.msg_payload(), &*self.clock);
        self.payloads.store(&payload).await?;

        let record = AuditRecord::from_message(message, payload_id, &*self.clock);
        for view in AuditView::ALL {
            self.records.store(view, &record).await?;
        }

        tracing::debug!(
            record_id = %record.id(),
            payload_id = %payload_id,
            "audit message fanned out to all views"
        );
        Ok(record)
    }

    /// Queries messages by time interval.
    ///
    /// # Errors
    ///
    /// Returns [`AuditServiceError::Domain`] when the range exceeds the
    /// view's maximum window, or [`AuditServiceError::Repository`] when the
    /// paging token is invalid or the scan fails.
    pub async fn messages_by_interval(
        &self,
        range: TimeRange,
        page: PageRequest,
    ) -> AuditServiceResult<Page<AuditRecord>> {
        self.fetch_guarded(RecordQuery::by_interval(range), page)
            .await
    }

    /// Queries messages by user and time interval.
    ///
    /// # Errors
    ///
    /// As [`Self::messages_by_interval`]; the range guard runs before the
    /// user filter is considered.
    pub async fn messages_by_user_interval(
        &self,
        user: impl Into<String> + Send,
        range: TimeRange,
        page: PageRequest,
    ) -> AuditServiceResult<Page<AuditRecord>> {
        self.fetch_guarded(RecordQuery::by_user_interval(user, range), page)
            .await
    }

    /// Queries messages by user, subject, and time interval.
    ///
    /// # Errors
    ///
    /// As [`Self::messages_by_interval`]; the range guard runs before the
    /// filters are considered.
    pub async fn messages_by_user_subject_interval(
        &self,
        user: impl Into<String> + Send,
        subject: impl Into<String> + Send,
        range: TimeRange,
        page: PageRequest,
    ) -> AuditServiceResult<Page<AuditRecord>> {
        self.fetch_guarded(
            RecordQuery::by_user_subject_interval(user, subject, range),
            page,
        )
        .await
    }

    async fn fetch_guarded(
        &self,
        query: RecordQuery,
        page: PageRequest,
    ) -> AuditServiceResult<Page<AuditRecord>> {
        query.range().validate_span(query.view())?;
        let sized_page = match page.fetch_size() {
            Some(_) => page,
            None => page.with_fetch_size(self.default_fetch_size),
        };

        tracing::debug!(
            view = %query.view(),
            from = %query.range().from(),
            to = %query.range().to(),
            "fetching audit message page"
        );
        Ok(self.records.fetch(&query, &sized_page).await?)
    }
}
