//! Error types for audit domain validation and parsing.

use super::AuditView;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or validating audit domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuditDomainError {
    /// The range start falls after the range end.
    #[error("invalid time range: {from} is after {to}")]
    InvalidTimeRange {
        /// Requested range start.
        from: DateTime<Utc>,
        /// Requested range end.
        to: DateTime<Utc>,
    },

    /// The requested range exceeds the view's maximum query window.
    ///
    /// The display message is fixed; callers match on it.
    #[error("specified time range is too big, be more specific")]
    RangeTooWide {
        /// The view the query targeted.
        view: AuditView,
        /// Requested span in days, rounded down.
        requested_days: i64,
        /// Maximum span the view accepts, in days.
        max_days: i64,
    },
}

/// Error returned when a continuation token cannot be decoded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid paging state: {0}")]
pub struct PagingStateError(pub String);

/// Error returned while parsing message statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown message status: {0}")]
pub struct ParseMessageStatusError(pub String);
