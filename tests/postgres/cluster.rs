//! Embedded `PostgreSQL` cluster lifecycle helpers.
//!
//! One cluster is started lazily per test binary and shared by every test;
//! each test creates its own database so tests stay isolated.

use postgresql_embedded::PostgreSQL;
use rstest::fixture;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

/// Boxed error type for test infrastructure failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Managed embedded `PostgreSQL` cluster for test lifecycles.
pub struct ManagedCluster {
    postgres: PostgreSQL,
    runtime: Runtime,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let mut postgres = PostgreSQL::default();
        runtime.block_on(async {
            postgres.setup().await?;
            postgres.start().await
        })?;
        Ok(Self { postgres, runtime })
    }

    /// Builds the connection URL for a database on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.postgres.settings().url(database)
    }

    /// Creates a database on the cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the `CREATE DATABASE` statement fails.
    pub fn create_database(&self, database: &str) -> Result<(), BoxError> {
        self.runtime
            .block_on(self.postgres.create_database(database))
            .map_err(|err| Box::new(err) as BoxError)
    }

    /// Drops a database from the cluster.
    ///
    /// # Errors
    ///
    /// Returns an error if the `DROP DATABASE` statement fails.
    pub fn drop_database(&self, database: &str) -> Result<(), BoxError> {
        self.runtime
            .block_on(self.postgres.drop_database(database))
            .map_err(|err| Box::new(err) as BoxError)
    }
}

/// Provides the shared cluster, starting it on first use.
///
/// # Panics
///
/// Panics if the embedded cluster cannot be provisioned; no database test
/// can run without it.
#[fixture]
pub fn postgres_cluster() -> PostgresCluster {
    let shared = SHARED_CLUSTER.get_or_init(|| ManagedCluster::new().map_err(|err| err.to_string()));
    match shared {
        Ok(cluster) => cluster,
        Err(err) => panic!("embedded cluster failed to start: {err}"),
    }
}
