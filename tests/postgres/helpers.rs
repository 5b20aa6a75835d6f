//! Shared test helpers for `PostgreSQL` integration tests.

use std::env;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use super::cluster::{ManagedCluster, shared_cluster};
use chrono::{Duration, Utc};
use crate::test_helpers::reference_now;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use todo_service::task::{
    adapters::postgres::{PostgresTaskRepository, build_pool},
    domain::{NewTask, TaskState, UserId},
};

pub use super::cluster::BoxError;

/// Environment variable naming an external test database.
///
/// When set, tests run against it instead of the embedded cluster.
pub const DATABASE_URL_ENV: &str = "TODO_TEST_DATABASE_URL";

/// SQL creating the task table.
pub const CREATE_TASK_TABLE_SQL: &str =
    include_str!("../../migrations/2026-10-18-000000_create_todo_task/up.sql");

/// Template database holding the migrated schema on the embedded cluster.
pub const TEMPLATE_DB: &str = "todo_test_template";

static EXTERNAL_MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();
static NEXT_USER: AtomicI64 = AtomicI64::new(0);
static NEXT_DATABASE: AtomicU32 = AtomicU32::new(0);

/// Returns the external database URL, if one is configured.
#[must_use]
pub fn database_url() -> Option<String> {
    env::var(DATABASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
}

fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url)?;
    conn.batch_execute(CREATE_TASK_TABLE_SQL)?;
    Ok(())
}

/// Database a test runs against.
///
/// Embedded databases are cloned from [`TEMPLATE_DB`] and dropped with the
/// value. External databases are shared and left in place.
pub enum TestDatabase {
    /// Database named by [`DATABASE_URL_ENV`].
    External,
    /// Per-test database on the embedded cluster.
    Embedded {
        /// Cluster owning the database.
        cluster: &'static ManagedCluster,
        /// Database name.
        name: String,
    },
}

impl Drop for TestDatabase {
    fn drop(&mut self) {
        if let Self::Embedded { cluster, name } = self {
            drop(cluster.drop_database(name));
        }
    }
}

/// Repository under test together with the database backing it.
pub struct PreparedRepo {
    /// Repository connected to [`Self::database`].
    pub repo: PostgresTaskRepository,
    /// Keeps the database alive for the test; dropped after the pool.
    pub database: TestDatabase,
}

#[expect(clippy::print_stderr, reason = "skip notices must reach the test log")]
fn report_skip(reason: &str) {
    eprintln!("skipping PostgreSQL test: {reason}");
}

fn prepare_external(url: &str) -> Result<PreparedRepo, BoxError> {
    EXTERNAL_MIGRATED
        .get_or_init(|| apply_migrations(url).map_err(|err| err.to_string()))
        .clone()
        .map_err(BoxError::from)?;
    Ok(PreparedRepo {
        repo: PostgresTaskRepository::new(build_pool(url, 4)?),
        database: TestDatabase::External,
    })
}

fn prepare_embedded(cluster: &'static ManagedCluster) -> Result<PreparedRepo, BoxError> {
    cluster.ensure_template(TEMPLATE_DB, apply_migrations)?;
    let name = format!(
        "todo_test_{}_{}",
        std::process::id(),
        NEXT_DATABASE.fetch_add(1, Ordering::Relaxed)
    );
    cluster.create_database_from_template(&name, TEMPLATE_DB)?;
    let database = TestDatabase::Embedded {
        cluster,
        name: name.clone(),
    };
    let pool = build_pool(&cluster.database_url(&name), 2)?;
    Ok(PreparedRepo {
        repo: PostgresTaskRepository::new(pool),
        database,
    })
}

/// Builds a repository for one test.
///
/// Uses [`DATABASE_URL_ENV`] when set, applying the schema once per process.
/// Otherwise starts the shared embedded cluster and clones a fresh database
/// from the migrated template. Returns `Ok(None)`, after logging why, when
/// the embedded cluster cannot be started on this machine.
///
/// # Errors
///
/// Returns an error if the schema cannot be applied, the database cannot be
/// created or the pool cannot be built.
pub async fn setup_repository() -> Result<Option<PreparedRepo>, BoxError> {
    tokio::task::spawn_blocking(|| {
        if let Some(url) = database_url() {
            return prepare_external(&url).map(Some);
        }
        match shared_cluster() {
            Ok(cluster) => prepare_embedded(cluster).map(Some),
            Err(reason) => {
                report_skip(&reason);
                Ok(None)
            }
        }
    })
    .await?
}

/// Allocates a user id no other test in any run is likely to share.
///
/// # Panics
///
/// Panics if the generated id is not positive, which cannot happen.
#[must_use]
pub fn fresh_user() -> UserId {
    let seed = Utc::now()
        .timestamp_micros()
        .rem_euclid(1_000_000_000_000);
    let sequence = NEXT_USER.fetch_add(1, Ordering::Relaxed);
    UserId::new(seed * 1_000 + sequence + 1).expect("generated user id is positive")
}

/// Builds an insert model ending `end_in_days` after [`reference_now`].
#[must_use]
pub fn new_task(user_id: UserId, title: &str, end_in_days: i64) -> NewTask {
    NewTask {
        user_id,
        title: title.to_owned(),
        description: Some(format!("{title} details")),
        start_date: reference_now(),
        end_date: reference_now() + Duration::days(end_in_days),
        state: TaskState::InProgress,
        created_on: reference_now(),
    }
}
