//! Audit-message persistence and query subsystem.
//!
//! One saved message is denormalized into three lookup tables keyed by
//! progressively more selective filters (time interval; user + interval;
//! user + subject + interval), each row referencing a payload blob stored
//! once in a side-table. Queries are parameterized range scans with
//! cursor-based pagination and a per-view maximum-window guard. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
