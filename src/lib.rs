//! Northstore: denormalized audit-message store.
//!
//! This crate persists timestamped audit messages into a wide-column style
//! layout (three denormalized lookup tables plus a payload side-table) and
//! serves cursor-paginated range queries over them.
//!
//! # Architecture
//!
//! Northstore follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (`PostgreSQL`,
//!   in-memory)
//!
//! # Modules
//!
//! - [`audit`]: Audit-message fan-out persistence and paged query paths

pub mod audit;
