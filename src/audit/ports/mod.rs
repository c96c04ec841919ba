//! Port contracts for audit-message persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by the audit
//! services.

pub mod payload;
pub mod repository;

pub use payload::{PayloadRepository, PayloadRepositoryError, PayloadRepositoryResult};
pub use repository::{AuditRecordRepository, AuditRepositoryError, AuditRepositoryResult};

#[cfg(test)]
pub use payload::MockPayloadRepository;
#[cfg(test)]
pub use repository::MockAuditRecordRepository;
