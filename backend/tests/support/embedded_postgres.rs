//! Per-test databases on the shared embedded PostgreSQL cluster.
//!
//! Every test gets a fresh database with the embedded migrations applied, so
//! suites can run in parallel without cleaning up after each other.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;
use marketplace::outbound::persistence::MIGRATIONS;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;

/// Temporary database, dropped with the value.
pub struct TestDatabase {
    url: String,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Create a migrated database on the shared cluster.
///
/// Must be called outside a Tokio runtime; the cluster bootstrap drives its
/// own.
pub fn provision_database() -> Result<TestDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    let database = cluster
        .temporary_database(format!("test_{}", uuid::Uuid::new_v4().simple()))
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_owned();
    migrate(&url)?;
    Ok(TestDatabase {
        url,
        _database: database,
    })
}

fn migrate(url: &str) -> Result<(), String> {
    let mut conn = PgConnection::establish(url).map_err(|err| format!("connect: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|_| ())
        .map_err(|err| format!("migration: {err}"))
}
