//! Diesel schema for the denormalized audit tables.
//!
//! The three lookup tables carry identical columns; only the key structure
//! (via the bucket granularity) differs. The payload blob lives in its own
//! side-table so lookup rows stay narrow.

diesel::table! {
    /// Audit records keyed by day bucket.
    audit_by_interval (bucket, occur_time, id) {
        /// Day partition bucket derived from the occurrence time.
        bucket -> Int8,
        /// Occurrence timestamp.
        occur_time -> Timestamptz,
        /// Record identifier.
        id -> Uuid,
        /// Originating user.
        #[max_length = 255]
        user_name -> Varchar,
        /// Message subject.
        #[max_length = 255]
        subject -> Varchar,
        /// Message name.
        #[max_length = 255]
        msg_name -> Varchar,
        /// Processing status.
        #[max_length = 50]
        msg_status -> Varchar,
        /// Payload side-table reference.
        payload_id -> Uuid,
        /// Storage timestamp.
        stored_at -> Timestamptz,
    }
}

diesel::table! {
    /// Audit records keyed by week bucket, filtered by user.
    audit_by_user_interval (bucket, occur_time, id) {
        /// Week partition bucket derived from the occurrence time.
        bucket -> Int8,
        /// Occurrence timestamp.
        occur_time -> Timestamptz,
        /// Record identifier.
        id -> Uuid,
        /// Originating user.
        #[max_length = 255]
        user_name -> Varchar,
        /// Message subject.
        #[max_length = 255]
        subject -> Varchar,
        /// Message name.
        #[max_length = 255]
        msg_name -> Varchar,
        /// Processing status.
        #[max_length = 50]
        msg_status -> Varchar,
        /// Payload side-table reference.
        payload_id -> Uuid,
        /// Storage timestamp.
        stored_at -> Timestamptz,
    }
}

diesel::table! {
    /// Audit records keyed by month bucket, filtered by user and subject.
    audit_by_user_subject_interval (bucket, occur_time, id) {
        /// Month partition bucket derived from the occurrence time.
        bucket -> Int8,
        /// Occurrence timestamp.
        occur_time -> Timestamptz,
        /// Record identifier.
        id -> Uuid,
        /// Originating user.
        #[max_length = 255]
        user_name -> Varchar,
        /// Message subject.
        #[max_length = 255]
        subject -> Varchar,
        /// Message name.
        #[max_length = 255]
        msg_name -> Varchar,
        /// Processing status.
        #[max_length = 50]
        msg_status -> Varchar,
        /// Payload side-table reference.
        payload_id -> Uuid,
        /// Storage timestamp.
        stored_at -> Timestamptz,
    }
}

diesel::table! {
    /// Payload blobs referenced from all three lookup tables.
    payloads_by_id (id) {
        /// Payload identifier.
        id -> Uuid,
        /// Opaque payload blob.
        msg_payload -> Text,
        /// Storage timestamp.
        stored_at -> Timestamptz,
    }
}
