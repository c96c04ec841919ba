//! Read-model views, partition-bucket arithmetic, and the query-window guard.
//!
//! Each saved message is replicated into three lookup tables keyed by
//! progressively more selective filters. A coarser filter gets a finer
//! partition bucket and a tighter maximum query window, so a single query
//! never has to scan an unbounded number of partitions.

use super::AuditDomainError;
use chrono::{DateTime, Datelike, Utc};
use std::fmt;
use std::ops::RangeInclusive;

/// The three denormalized read models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuditView {
    /// Lookup by time interval only. Day buckets.
    ByInterval,
    /// Lookup by user and time interval. Week buckets.
    ByUserInterval,
    /// Lookup by user, subject, and time interval. Month buckets.
    ByUserSubjectInterval,
}

impl AuditView {
    /// All views, in fan-out write order.
    pub const ALL: [Self; 3] = [
        Self::ByInterval,
        Self::ByUserInterval,
        Self::ByUserSubjectInterval,
    ];

    /// Returns the canonical view name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByInterval => "by_interval",
            Self::ByUserInterval => "by_user_interval",
            Self::ByUserSubjectInterval => "by_user_subject_interval",
        }
    }

    /// Maximum queryable span, in whole days.
    #[must_use]
    pub const fn max_span_days(self) -> i64 {
        match self {
            Self::ByInterval => 60,
            Self::ByUserInterval => 92,
            Self::ByUserSubjectInterval => 183,
        }
    }

    /// Computes the partition bucket an occurrence timestamp falls into at
    /// this view's granularity.
    #[must_use]
    pub fn bucket_of(self, at: DateTime<Utc>) -> i64 {
        let date = at.date_naive();
        match self {
            Self::ByInterval => i64::from(date.num_days_from_ce()),
            Self::ByUserInterval => i64::from(date.num_days_from_ce()).div_euclid(7),
            Self::ByUserSubjectInterval => {
                i64::from(date.year()) * 12 + i64::from(date.month0())
            }
        }
    }
}

impl fmt::Display for AuditView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive occurrence-time range for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeRange {
    /// Creates a validated range.
    ///
    /// # Errors
    ///
    /// Returns [`AuditDomainError::InvalidTimeRange`] when `from` is after
    /// `to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, AuditDomainError> {
        if from > to {
            return Err(AuditDomainError::InvalidTimeRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Returns the range start.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the range end.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Checks the range against a view's maximum query window.
    ///
    /// # Errors
    ///
    /// Returns [`AuditDomainError::RangeTooWide`] when the span exceeds
    /// [`AuditView::max_span_days`].
    pub fn validate_span(&self, view: AuditView) -> Result<(), AuditDomainError> {
        let requested_days = (self.to - self.from).num_days();
        let max_days = view.max_span_days();
        if requested_days > max_days {
            return Err(AuditDomainError::RangeTooWide {
                view,
                requested_days,
                max_days,
            });
        }
        Ok(())
    }

    /// Returns the inclusive bucket range this time range spans at the
    /// view's granularity.
    #[must_use]
    pub fn bucket_range(&self, view: AuditView) -> RangeInclusive<i64> {
        view.bucket_of(self.from)..=view.bucket_of(self.to)
    }
}
