//! In-memory payload repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::audit::{
    domain::{Payload, PayloadId},
    ports::{PayloadRepository, PayloadRepositoryError, PayloadRepositoryResult},
};

/// Thread-safe in-memory payload repository. Suitable for tests only.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayloadRepository {
    payloads: Arc<RwLock<HashMap<PayloadId, Payload>>>,
}

impl InMemoryPayloadRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayloadRepository for InMemoryPayloadRepository {
    async fn store(&self, payload: &Payload) -> PayloadRepositoryResult<()> {
        let mut guard = self.payloads.write().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        guard.insert(payload.id(), payload.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PayloadId) -> PayloadRepositoryResult<Option<Payload>> {
        let guard = self.payloads.read().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(guard.get(&id).cloned())
    }
}
