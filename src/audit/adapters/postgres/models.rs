//! Diesel row models for the denormalized audit tables.
//!
//! The three lookup tables share one column set, so the row and insert
//! models are stamped out per table by a local macro; Diesel ties each
//! model to exactly one table.

use super::schema::{
    audit_by_interval, audit_by_user_interval, audit_by_user_subject_interval, payloads_by_id,
};
use crate::audit::domain::{
    AuditRecord, MessageStatus, ParseMessageStatusError, PayloadId, PersistedRecordData, RecordId,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

macro_rules! audit_row_models {
    ($table:ident, $row:ident, $new_row:ident) => {
        #[doc = concat!("Query result row for `", stringify!($table), "`.")]
        #[derive(Debug, Clone, Queryable, Selectable)]
        #[diesel(table_name = $table)]
        #[diesel(check_for_backend(diesel::pg::Pg))]
        pub struct $row {
            /// Partition bucket.
            pub bucket: i64,
            /// Occurrence timestamp.
            pub occur_time: DateTime<Utc>,
            /// Record identifier.
            pub id: uuid::Uuid,
            /// Originating user.
            pub user_name: String,
            /// Message subject.
            pub subject: String,
            /// Message name.
            pub msg_name: String,
            /// Processing status.
            pub msg_status: String,
            /// Payload side-table reference.
            pub payload_id: uuid::Uuid,
            /// Storage timestamp.
            pub stored_at: DateTime<Utc>,
        }

        impl $row {
            /// Converts the row into the domain record.
            ///
            /// # Errors
            ///
            /// Returns [`ParseMessageStatusError`] when the stored status is
            /// not part of the status vocabulary.
            pub fn into_record(self) -> Result<AuditRecord, ParseMessageStatusError> {
                let msg_status = MessageStatus::try_from(self.msg_status.as_str())?;
                Ok(AuditRecord::from_persisted(PersistedRecordData {
                    id: RecordId::from_uuid(self.id),
                    occur_time: self.occur_time,
                    user: self.user_name,
                    subject: self.subject,
                    msg_name: self.msg_name,
                    msg_status,
                    payload_id: PayloadId::from_uuid(self.payload_id),
                    stored_at: self.stored_at,
                }))
            }
        }

        #[doc = concat!("Insert model for `", stringify!($table), "`.")]
        #[derive(Debug, Clone, Insertable)]
        #[diesel(table_name = $table)]
        pub struct $new_row {
            /// Partition bucket.
            pub bucket: i64,
            /// Occurrence timestamp.
            pub occur_time: DateTime<Utc>,
            /// Record identifier.
            pub id: uuid::Uuid,
            /// Originating user.
            pub user_name: String,
            /// Message subject.
            pub subject: String,
            /// Message name.
            pub msg_name: String,
            /// Processing status.
            pub msg_status: String,
            /// Payload side-table reference.
            pub payload_id: uuid::Uuid,
            /// Storage timestamp.
            pub stored_at: DateTime<Utc>,
        }

        impl $new_row {
            /// Builds the insert model for a record at the given bucket.
            #[must_use]
            pub fn from_record(bucket: i64, record: &AuditRecord) -> Self {
                Self {
                    bucket,
                    occur_time: record.occur_time(),
                    id: record.id().into_inner(),
                    user_name: record.user().to_owned(),
                    subject: record.subject().to_owned(),
                    msg_name: record.msg_name().to_owned(),
                    msg_status: record.msg_status().as_str().to_owned(),
                    payload_id: record.payload_id().into_inner(),
                    stored_at: record.stored_at(),
                }
            }
        }
    };
}

audit_row_models!(audit_by_interval, IntervalRow, NewIntervalRow);
audit_row_models!(audit_by_user_interval, UserIntervalRow, NewUserIntervalRow);
audit_row_models!(
    audit_by_user_subject_interval,
    UserSubjectIntervalRow,
    NewUserSubjectIntervalRow
);

/// Query result row for `payloads_by_id`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = payloads_by_id)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PayloadRow {
    /// Payload identifier.
    pub id: uuid::Uuid,
    /// Opaque payload blob.
    pub msg_payload: String,
    /// Storage timestamp.
    pub stored_at: DateTime<Utc>,
}

/// Insert model for `payloads_by_id`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = payloads_by_id)]
pub struct NewPayloadRow {
    /// Payload identifier.
    pub id: uuid::Uuid,
    /// Opaque payload blob.
    pub msg_payload: String,
    /// Storage timestamp.
    pub stored_at: DateTime<Utc>,
}
