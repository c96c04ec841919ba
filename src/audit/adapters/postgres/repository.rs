//! `PostgreSQL` repository implementations for audit persistence.
//!
//! The wide-column partition key becomes an explicit `bucket` column; a
//! keyset predicate over `(bucket, occur_time, id)` stands in for the
//! store's paging state.

use super::models::{
    IntervalRow, NewIntervalRow, NewPayloadRow, NewUserIntervalRow, NewUserSubjectIntervalRow,
    PayloadRow, UserIntervalRow, UserSubjectIntervalRow,
};
use super::schema;
use crate::audit::{
    domain::{AuditRecord, AuditView, Page, PageRequest, Payload, PayloadId, RecordQuery},
    ports::{
        AuditRecordRepository, AuditRepositoryError, AuditRepositoryResult, PayloadRepository,
        PayloadRepositoryError, PayloadRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by audit adapters.
pub type AuditPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed audit-record repository.
#[derive(Debug, Clone)]
pub struct PostgresAuditRepository {
    pool: AuditPgPool,
}

macro_rules! fetch_view_page {
    ($table:ident, $row:ty, $connection:expr, $query:expr, $after:expr, $limit:expr) => {{
        use super::schema::$table::dsl;
        let buckets = $query.bucket_range();
        let range = $query.range();
        let mut stmt = dsl::$table
            .filter(dsl::bucket.between(*buckets.start(), *buckets.end()))
            .filter(dsl::occur_time.between(range.from(), range.to()))
            .into_boxed();
        if let Some(user) = $query.user() {
            stmt = stmt.filter(dsl::user_name.eq(user.to_owned()));
        }
        if let Some(subject) = $query.subject() {
            stmt = stmt.filter(dsl::subject.eq(subject.to_owned()));
        }
        if let Some(cursor) = $after {
            stmt = stmt.filter(
                dsl::bucket
                    .gt(cursor.bucket)
                    .or(dsl::bucket
                        .eq(cursor.bucket)
                        .and(dsl::occur_time.gt(cursor.occur_time)))
                    .or(dsl::bucket
                        .eq(cursor.bucket)
                        .and(dsl::occur_time.eq(cursor.occur_time))
                        .and(dsl::id.gt(cursor.record_id.into_inner()))),
            );
        }
        stmt.order((dsl::bucket.asc(), dsl::occur_time.asc(), dsl::id.asc()))
            .limit($limit)
            .load::<$row>($connection)
            .map_err(AuditRepositoryError::persistence)
            .and_then(|rows| {
                rows.into_iter()
                    .map(|row| row.into_record().map_err(AuditRepositoryError::persistence))
                    .collect::<AuditRepositoryResult<Vec<AuditRecord>>>()
            })
    }};
}

impl PostgresAuditRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuditPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AuditRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AuditRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AuditRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AuditRepositoryError::persistence)?
    }
}

#[async_trait]
impl AuditRecordRepository for PostgresAuditRepository {
    async fn store(&self, view: AuditView, record: &AuditRecord) -> AuditRepositoryResult<()> {
        let bucket = view.bucket_of(record.occur_time());
        let row_record = record.clone();

        self.run_blocking(move |connection| {
            match view {
                AuditView::ByInterval => diesel::insert_into(schema::audit_by_interval::table)
                    .values(&NewIntervalRow::from_record(bucket, &row_record))
                    .execute(connection),
                AuditView::ByUserInterval => {
                    diesel::insert_into(schema::audit_by_user_interval::table)
                        .values(&NewUserIntervalRow::from_record(bucket, &row_record))
                        .execute(connection)
                }
                AuditView::ByUserSubjectInterval => {
                    diesel::insert_into(schema::audit_by_user_subject_interval::table)
                        .values(&NewUserSubjectIntervalRow::from_record(bucket, &row_record))
                        .execute(connection)
                }
            }
            .map_err(AuditRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn fetch(
        &self,
        query: &RecordQuery,
        page: &PageRequest,
    ) -> AuditRepositoryResult<Page<AuditRecord>> {
        let after = page.cursor()?;
        let fetch_size = page.fetch_size_or(PageRequest::DEFAULT_FETCH_SIZE);
        let limit = i64::try_from(fetch_size).map_err(AuditRepositoryError::persistence)?;
        let scan_query = query.clone();

        self.run_blocking(move |connection| {
            let records = match scan_query.view() {
                AuditView::ByInterval => fetch_view_page!(
                    audit_by_interval,
                    IntervalRow,
                    connection,
                    scan_query,
                    after,
                    limit
                ),
                AuditView::ByUserInterval => fetch_view_page!(
                    audit_by_user_interval,
                    UserIntervalRow,
                    connection,
                    scan_query,
                    after,
                    limit
                ),
                AuditView::ByUserSubjectInterval => fetch_view_page!(
                    audit_by_user_subject_interval,
                    UserSubjectIntervalRow,
                    connection,
                    scan_query,
                    after,
                    limit
                ),
            }?;
            Page::from_scan(scan_query.view(), records, fetch_size)
                .map_err(AuditRepositoryError::from)
        })
        .await
    }
}

/// `PostgreSQL`-backed payload repository.
#[derive(Debug, Clone)]
pub struct PostgresPayloadRepository {
    pool: AuditPgPool,
}

impl PostgresPayloadRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AuditPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PayloadRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PayloadRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PayloadRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PayloadRepositoryError::persistence)?
    }
}

#[async_trait]
impl PayloadRepository for PostgresPayloadRepository {
    async fn store(&self, payload: &Payload) -> PayloadRepositoryResult<()> {
        let new_row = NewPayloadRow {
            id: payload.id().into_inner(),
            msg_payload: payload.msg_payload().to_owned(),
            stored_at: payload.stored_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(schema::payloads_by_id::table)
                .values(&new_row)
                .execute(connection)
                .map_err(PayloadRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: PayloadId) -> PayloadRepositoryResult<Option<Payload>> {
        self.run_blocking(move |connection| {
            let row = schema::payloads_by_id::table
                .filter(schema::payloads_by_id::id.eq(id.into_inner()))
                .select(PayloadRow::as_select())
                .first::<PayloadRow>(connection)
                .optional()
                .map_err(PayloadRepositoryError::persistence)?;
            Ok(row.map(|found| {
                Payload::from_persisted(
                    PayloadId::from_uuid(found.id),
                    found.msg_payload,
                    found.stored_at,
                )
            }))
        })
        .await
    }
}
