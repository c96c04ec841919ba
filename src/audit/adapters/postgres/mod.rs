//! `PostgreSQL` adapters for audit persistence.

mod models;
mod repository;
mod schema;

pub use repository::{AuditPgPool, PostgresAuditRepository, PostgresPayloadRepository};
