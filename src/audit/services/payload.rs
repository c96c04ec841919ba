//! Service layer for payload lookup.

use super::AuditServiceResult;
use crate::audit::{
    domain::{Payload, PayloadId},
    ports::PayloadRepository,
};
use std::sync::Arc;

/// Payload lookup service.
#[derive(Clone)]
pub struct PayloadService<P>
where
    P: PayloadRepository,
{
    payloads: Arc<P>,
}

impl<P> PayloadService<P>
where
    P: PayloadRepository,
{
    /// Creates a new payload service.
    #[must_use]
    pub const fn new(payloads: Arc<P>) -> Self {
        Self { payloads }
    }

    /// Retrieves the payload referenced by a lookup-table row.
    ///
    /// Returns `Ok(None)` when no payload exists for the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuditServiceError::Payload`](super::AuditServiceError::Payload)
    /// when the lookup fails.
    pub async fn message_payload(&self, id: PayloadId) -> AuditServiceResult<Option<Payload>> {
        Ok(self.payloads.find_by_id(id).await?)
    }
}
