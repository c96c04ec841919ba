//! Adapter implementations of the audit persistence ports.

pub mod memory;
pub mod postgres;
