//! Denormalized audit record row and the payload side-table row.

use super::{AuditMessage, MessageStatus, PayloadId, RecordId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Denormalized read-model row shared by all three lookup tables.
///
/// The partition bucket is not part of the domain row; adapters derive it
/// from [`occur_time`](Self::occur_time) at each view's granularity when a
/// row is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    id: RecordId,
    occur_time: DateTime<Utc>,
    user: String,
    subject: String,
    msg_name: String,
    msg_status: MessageStatus,
    payload_id: PayloadId,
    stored_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRecordData {
    /// Persisted record identifier.
    pub id: RecordId,
    /// Persisted occurrence timestamp.
    pub occur_time: DateTime<Utc>,
    /// Persisted user identifier.
    pub user: String,
    /// Persisted subject identifier.
    pub subject: String,
    /// Persisted message name.
    pub msg_name: String,
    /// Persisted processing status.
    pub msg_status: MessageStatus,
    /// Persisted payload reference.
    pub payload_id: PayloadId,
    /// Persisted storage timestamp.
    pub stored_at: DateTime<Utc>,
}

impl AuditRecord {
    /// Creates the fan-out row for a source message.
    #[must_use]
    pub fn from_message(
        message: &AuditMessage,
        payload_id: PayloadId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: RecordId::new(),
            occur_time: message.occur_time(),
            user: message.user().to_owned(),
            subject: message.subject().to_owned(),
            msg_name: message.msg_name().to_owned(),
            msg_status: message.msg_status(),
            payload_id,
            stored_at: clock.utc(),
        }
    }

    /// Reconstructs a record from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRecordData) -> Self {
        Self {
            id: data.id,
            occur_time: data.occur_time,
            user: data.user,
            subject: data.subject,
            msg_name: data.msg_name,
            msg_status: data.msg_status,
            payload_id: data.payload_id,
            stored_at: data.stored_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the occurrence timestamp.
    #[must_use]
    pub const fn occur_time(&self) -> DateTime<Utc> {
        self.occur_time
    }

    /// Returns the originating user.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Returns the message subject.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the message name.
    #[must_use]
    pub fn msg_name(&self) -> &str {
        &self.msg_name
    }

    /// Returns the processing status.
    #[must_use]
    pub const fn msg_status(&self) -> MessageStatus {
        self.msg_status
    }

    /// Returns the payload reference.
    #[must_use]
    pub const fn payload_id(&self) -> PayloadId {
        self.payload_id
    }

    /// Returns the storage timestamp.
    #[must_use]
    pub const fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }
}

/// Payload side-table row referenced by every lookup-table replica.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    id: PayloadId,
    msg_payload: String,
    stored_at: DateTime<Utc>,
}

impl Payload {
    /// Creates a payload row.
    #[must_use]
    pub fn new(id: PayloadId, msg_payload: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id,
            msg_payload: msg_payload.into(),
            stored_at: clock.utc(),
        }
    }

    /// Reconstructs a payload row from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: PayloadId,
        msg_payload: impl Into<String>,
        stored_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            msg_payload: msg_payload.into(),
            stored_at,
        }
    }

    /// Returns the payload identifier.
    #[must_use]
    pub const fn id(&self) -> PayloadId {
        self.id
    }

    /// Returns the opaque payload blob.
    #[must_use]
    pub fn msg_payload(&self) -> &str {
        &self.msg_payload
    }

    /// Returns the storage timestamp.
    #[must_use]
    pub const fn stored_at(&self) -> DateTime<Utc> {
        self.stored_at
    }
}
