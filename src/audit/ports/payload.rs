//! Repository port for the payload side-table.

use crate::audit::domain::{Payload, PayloadId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for payload repository operations.
pub type PayloadRepositoryResult<T> = Result<T, PayloadRepositoryError>;

/// Payload persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PayloadRepository: Send + Sync {
    /// Stores a payload row.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadRepositoryError::Persistence`] when the write fails.
    async fn store(&self, payload: &Payload) -> PayloadRepositoryResult<()>;

    /// Looks up a payload by identifier.
    ///
    /// Returns `None` when no payload exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadRepositoryError::Persistence`] when the lookup
    /// fails.
    async fn find_by_id(&self, id: PayloadId) -> PayloadRepositoryResult<Option<Payload>>;
}

/// Errors returned by payload repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PayloadRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PayloadRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
