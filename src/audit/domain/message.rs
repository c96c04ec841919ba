//! Source audit-message record and its status vocabulary.

use super::ParseMessageStatusError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status carried by an audit message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// The message was received and not yet processed.
    Received,
    /// The message was processed successfully.
    Processed,
    /// Processing the message failed.
    Error,
}

impl MessageStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Processed => "processed",
            Self::Error => "error",
        }
    }
}

impl TryFrom<&str> for MessageStatus {
    type Error = ParseMessageStatusError;

    fn try_from(value: &str) -> Result<Self, ParseMessageStatusError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "received" => Ok(Self::Received),
            "processed" => Ok(Self::Processed),
            "error" => Ok(Self::Error),
            _ => Err(ParseMessageStatusError(value.to_owned())),
        }
    }
}

/// Source audit message as handed to the service for persistence.
///
/// User and subject are free-form identifiers from the originating system;
/// no shape is enforced on them. The payload is an opaque text blob stored
/// in the side-table, never in the lookup tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMessage {
    user: String,
    subject: String,
    msg_name: String,
    msg_status: MessageStatus,
    msg_payload: String,
    occur_time: DateTime<Utc>,
}

impl AuditMessage {
    /// Creates a message with the required fields.
    #[must_use]
    pub fn new(
        user: impl Into<String>,
        subject: impl Into<String>,
        occur_time: DateTime<Utc>,
    ) -> Self {
        Self {
            user: user.into(),
            subject: subject.into(),
            msg_name: String::new(),
            msg_status: MessageStatus::Received,
            msg_payload: String::new(),
            occur_time,
        }
    }

    /// Sets the message name.
    #[must_use]
    pub fn with_msg_name(mut self, msg_name: impl Into<String>) -> Self {
        self.msg_name = msg_name.into();
        self
    }

    /// Sets the processing status.
    #[must_use]
    pub const fn with_status(mut self, status: MessageStatus) -> Self {
        self.msg_status = status;
        self
    }

    /// Sets the opaque payload blob.
    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.msg_payload = payload.into();
        self
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

    /// Returns the opaque payload blob.
    #[must_use]
    pub fn msg_payload(&self) -> &str {
        &self.msg_payload
    }

    /// Returns the occurrence timestamp.
    #[must_use]
    pub const fn occur_time(&self) -> DateTime<Utc> {
        self.occur_time
    }
}
