//! Runs the task API against `PostgreSQL`.
//!
//! Usage:
//!
//! ```text
//! todo_server
//! ```
//!
//! Settings are read from the environment, after loading an optional `.env`
//! file from the working directory. See
//! [`ServiceConfig::from_env`](todo_service::config::ServiceConfig::from_env)
//! for the recognised variables.

use std::sync::Arc;

use mockable::DefaultClock;
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use todo_service::{
    config::ServiceConfig,
    http::{AppState, create_router},
    server,
    task::adapters::postgres::{PostgresTaskRepository, build_pool},
    telemetry,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    match dotenvy::dotenv() {
        Err(error) if !error.not_found() => return Err(error.into()),
        _ => {}
    }
    telemetry::init_tracing();

    run().inspect_err(|error| tracing::error!(%error, "task API stopped with an error"))
}

fn run() -> Result<(), BoxError> {
    let config = ServiceConfig::from_env()?;
    let pool = build_pool(
        &config.database.connection_string(),
        config.database.pool_size,
    )?;
    tracing::info!(
        host = %config.database.host,
        database = %config.database.name,
        pool_size = config.database.pool_size,
        "connection pool ready"
    );

    let state = AppState::new(
        Arc::new(PostgresTaskRepository::new(pool)),
        Arc::new(DefaultClock),
    );
    let router = create_router(state);

    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(async move {
        let listener = TcpListener::bind(config.listen_addr).await?;
        server::serve(listener, router).await
    })?;
    tracing::info!("connection pool closed");
    Ok(())
}
