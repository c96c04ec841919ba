//! Domain types for the audit subsystem.
//!
//! Pure types with no infrastructure dependencies: identifiers, the source
//! message, the denormalized record and payload rows, read-model views with
//! bucket arithmetic, pagination, and the query parameter object.

mod error;
mod ids;
mod message;
mod page;
mod query;
mod record;
mod view;

pub use error::{AuditDomainError, PagingStateError, ParseMessageStatusError};
pub use ids::{PayloadId, RecordId};
pub use message::{AuditMessage, MessageStatus};
pub use page::{Page, PageCursor, PageRequest, PagingState};
pub use query::RecordQuery;
pub use record::{AuditRecord, Payload, PersistedRecordData};
pub use view::{AuditView, TimeRange};
