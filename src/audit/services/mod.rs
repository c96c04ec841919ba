//! Orchestration services for audit-message persistence and query.

mod messages;
mod payload;

pub use messages::{AuditMessageService, AuditServiceError, AuditServiceResult};
pub use payload::PayloadService;
