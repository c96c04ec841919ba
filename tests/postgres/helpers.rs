//! Shared test helpers for `PostgreSQL` integration tests.

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use northstore::audit::{
    adapters::postgres::{PostgresAuditRepository, PostgresPayloadRepository},
    domain::{AuditMessage, AuditRecord, AuditView, MessageStatus, PayloadId, TimeRange},
    ports::AuditRecordRepository,
};
use rstest::fixture;
use std::io;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// SQL to create the audit tables for tests.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-08-10-000000_create_audit_tables/up.sql");

/// Provides a [`DefaultClock`] for test fixtures.
#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
pub fn test_runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Per-test database on the shared cluster, with repositories over it.
pub struct TestDatabase {
    cluster: PostgresCluster,
    name: String,
    records: PostgresAuditRepository,
    payloads: PostgresPayloadRepository,
}

impl TestDatabase {
    /// Creates a fresh database, applies the schema, and opens a pool.
    ///
    /// # Errors
    ///
    /// Returns an error if database creation, migration, or pool setup
    /// fails.
    pub fn create(cluster: PostgresCluster) -> Result<Self, BoxError> {
        let name = format!("audit_test_{}", Uuid::new_v4().simple());
        cluster.create_database(&name)?;

        let url = cluster.database_url(&name);
        let mut connection =
            PgConnection::establish(&url).map_err(|err| Box::new(err) as BoxError)?;
        connection
            .batch_execute(CREATE_SCHEMA_SQL)
            .map_err(|err| Box::new(err) as BoxError)?;
        drop(connection);

        let manager = ConnectionManager::<PgConnection>::new(url);
        let pool = Pool::builder()
            .max_size(2)
            .build(manager)
            .map_err(|err| Box::new(err) as BoxError)?;

        Ok(Self {
            cluster,
            name,
            records: PostgresAuditRepository::new(pool.clone()),
            payloads: PostgresPayloadRepository::new(pool),
        })
    }

    /// Returns the audit-record repository bound to this database.
    #[must_use]
    pub const fn records(&self) -> &PostgresAuditRepository {
        &self.records
    }

    /// Returns the payload repository bound to this database.
    #[must_use]
    pub const fn payloads(&self) -> &PostgresPayloadRepository {
        &self.payloads
    }

    /// Drops the pool and removes the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the `DROP DATABASE` statement fails.
    pub fn cleanup(self) -> Result<(), BoxError> {
        let Self {
            cluster,
            name,
            records,
            payloads,
        } = self;
        drop(records);
        drop(payloads);
        cluster.drop_database(&name)
    }
}

/// Midnight on the given January 2016 day.
///
/// # Panics
///
/// Panics if the day is not a valid January date.
#[must_use]
pub fn january(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 1, day, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Inclusive range between two January 2016 days.
///
/// # Panics
///
/// Panics if the bounds are inverted.
#[must_use]
pub fn january_range(from_day: u32, to_day: u32) -> TimeRange {
    TimeRange::new(january(from_day), january(to_day)).expect("valid range")
}

/// Builds a test record for the given user, subject, and occurrence time.
#[must_use]
pub fn make_record(
    clock: &DefaultClock,
    user: &str,
    subject: &str,
    occur_time: DateTime<Utc>,
) -> AuditRecord {
    let message = AuditMessage::new(user, subject, occur_time)
        .with_msg_name("device_event")
        .with_status(MessageStatus::Processed)
        .with_payload("{\"seq\":0}");
    AuditRecord::from_message(&message, PayloadId::new(), clock)
}

/// Stores `count` records into one view, one minute apart from the given
/// January day onward. Returns the stored records in write order.
///
/// # Panics
///
/// Panics if any store operation fails.
pub fn seed_view(
    rt: &Runtime,
    db: &TestDatabase,
    view: AuditView,
    clock: &DefaultClock,
    day: u32,
    count: i64,
) -> Vec<AuditRecord> {
    let mut stored = Vec::new();
    for offset in 0..count {
        let record = make_record(
            clock,
            "alice",
            "orders",
            january(day) + TimeDelta::minutes(offset),
        );
        rt.block_on(db.records().store(view, &record))
            .expect("store should succeed");
        stored.push(record);
    }
    stored
}
