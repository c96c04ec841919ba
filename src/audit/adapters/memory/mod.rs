//! In-memory adapters for audit persistence tests.

mod audit;
mod payload;

pub use audit::InMemoryAuditRepository;
pub use payload::InMemoryPayloadRepository;
