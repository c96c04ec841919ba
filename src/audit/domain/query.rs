//! Parameterized range query over one read-model view.

use super::{AuditView, TimeRange};
use std::ops::RangeInclusive;

/// A range/equality filtered query against one lookup table.
///
/// The constructor chosen fixes the view; equality filters are present
/// exactly for the key columns that view is denormalized by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    view: AuditView,
    range: TimeRange,
    user: Option<String>,
    subject: Option<String>,
}

impl RecordQuery {
    /// Query by time interval only.
    #[must_use]
    pub const fn by_interval(range: TimeRange) -> Self {
        Self {
            view: AuditView::ByInterval,
            range,
            user: None,
            subject: None,
        }
    }

    /// Query by user and time interval.
    #[must_use]
    pub fn by_user_interval(user: impl Into<String>, range: TimeRange) -> Self {
        Self {
            view: AuditView::ByUserInterval,
            range,
            user: Some(user.into()),
            subject: None,
        }
    }

    /// Query by user, subject, and time interval.
    #[must_use]
    pub fn by_user_subject_interval(
        user: impl Into<String>,
        subject: impl Into<String>,
        range: TimeRange,
    ) -> Self {
        Self {
            view: AuditView::ByUserSubjectInterval,
            range,
            user: Some(user.into()),
            subject: Some(subject.into()),
        }
    }

    /// Returns the targeted view.
    #[must_use]
    pub const fn view(&self) -> AuditView {
        self.view
    }

    /// Returns the occurrence-time range.
    #[must_use]
    pub const fn range(&self) -> &TimeRange {
        &self.range
    }

    /// Returns the user equality filter, if any.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Returns the subject equality filter, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the partition buckets the range spans on this view.
    #[must_use]
    pub fn bucket_range(&self) -> RangeInclusive<i64> {
        self.range.bucket_range(self.view)
    }
}
