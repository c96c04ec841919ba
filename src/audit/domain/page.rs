//! Cursor-based pagination types.
//!
//! A continuation token is the position of the last row a page returned,
//! serialized and base64-encoded so callers can treat it as an opaque
//! string. A completely full page always yields a token, even when the scan
//! happens to be exhausted; the follow-up request then returns an empty
//! page with no token, matching wide-column driver behaviour.

use super::{AuditRecord, AuditView, PagingStateError, RecordId};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque continuation token handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PagingState(String);

impl PagingState {
    /// Wraps a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning the raw string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PagingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decoded scan position behind a [`PagingState`] token.
///
/// Rows are ordered by `(bucket, occur_time, id)` ascending; the cursor
/// marks the last row already delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// Partition bucket of the last delivered row.
    pub bucket: i64,
    /// Occurrence timestamp of the last delivered row.
    pub occur_time: DateTime<Utc>,
    /// Identifier of the last delivered row.
    pub record_id: RecordId,
}

impl PageCursor {
    /// Builds the cursor pointing just past a delivered record.
    #[must_use]
    pub fn after_record(view: AuditView, record: &AuditRecord) -> Self {
        Self {
            bucket: view.bucket_of(record.occur_time()),
            occur_time: record.occur_time(),
            record_id: record.id(),
        }
    }

    /// Encodes the cursor into an opaque token.
    ///
    /// # Errors
    ///
    /// Returns [`PagingStateError`] when the cursor cannot be serialized.
    pub fn encode(&self) -> Result<PagingState, PagingStateError> {
        let json = serde_json::to_vec(self).map_err(|err| PagingStateError(err.to_string()))?;
        Ok(PagingState(STANDARD.encode(json)))
    }

    /// Decodes an opaque token back into a cursor.
    ///
    /// # Errors
    ///
    /// Returns [`PagingStateError`] when the token is not valid base64 or
    /// does not decode to a cursor.
    pub fn decode(state: &PagingState) -> Result<Self, PagingStateError> {
        let bytes = STANDARD
            .decode(state.as_str())
            .map_err(|err| PagingStateError(err.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|err| PagingStateError(err.to_string()))
    }
}

/// One page of query results plus the token to resume the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Rows in scan order.
    pub content: Vec<T>,
    /// Continuation token; `None` when the scan is known to be exhausted.
    pub paging_state: Option<PagingState>,
}

impl<T> Page<T> {
    /// Creates a page from its parts.
    #[must_use]
    pub const fn new(content: Vec<T>, paging_state: Option<PagingState>) -> Self {
        Self {
            content,
            paging_state,
        }
    }

    /// Creates an empty terminal page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            content: Vec::new(),
            paging_state: None,
        }
    }
}

impl Page<AuditRecord> {
    /// Builds a page from the rows a bounded scan produced.
    ///
    /// A token is issued exactly when the scan filled the page: the store
    /// cannot tell a full final page from a mid-scan page without reading
    /// ahead, so the token is returned and the next request drains to an
    /// empty page.
    ///
    /// # Errors
    ///
    /// Returns [`PagingStateError`] when the continuation cursor cannot be
    /// encoded.
    pub fn from_scan(
        view: AuditView,
        records: Vec<AuditRecord>,
        fetch_size: usize,
    ) -> Result<Self, PagingStateError> {
        let paging_state = match records.last() {
            Some(last) if records.len() == fetch_size => {
                Some(PageCursor::after_record(view, last).encode()?)
            }
            _ => None,
        };
        Ok(Self {
            content: records,
            paging_state,
        })
    }
}

/// Caller-supplied pagination parameters for one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    paging_state: Option<PagingState>,
    fetch_size: Option<usize>,
}

impl PageRequest {
    /// Fetch size applied when the caller does not set one, matching the
    /// wide-column driver default.
    pub const DEFAULT_FETCH_SIZE: usize = 5000;

    /// Requests the first page.
    #[must_use]
    pub const fn first() -> Self {
        Self {
            paging_state: None,
            fetch_size: None,
        }
    }

    /// Resumes a scan from a continuation token.
    #[must_use]
    pub const fn resume(paging_state: PagingState) -> Self {
        Self {
            paging_state: Some(paging_state),
            fetch_size: None,
        }
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_fetch_size(mut self, fetch_size: usize) -> Self {
        self.fetch_size = Some(fetch_size);
        self
    }

    /// Returns the continuation token, if any.
    #[must_use]
    pub const fn paging_state(&self) -> Option<&PagingState> {
        self.paging_state.as_ref()
    }

    /// Returns the requested page size, if set.
    #[must_use]
    pub const fn fetch_size(&self) -> Option<usize> {
        self.fetch_size
    }

    /// Returns the page size, falling back to the given default.
    #[must_use]
    pub fn fetch_size_or(&self, default: usize) -> usize {
        self.fetch_size.unwrap_or(default)
    }

    /// Returns the decoded continuation cursor, if a token was supplied.
    ///
    /// # Errors
    ///
    /// Returns [`PagingStateError`] when the token does not decode.
    pub fn cursor(&self) -> Result<Option<PageCursor>, PagingStateError> {
        self.paging_state
            .as_ref()
            .map(PageCursor::decode)
            .transpose()
    }
}
