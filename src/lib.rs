//! Todo service: a user-scoped task management HTTP API.
//!
//! Callers identified by the `user-id` header create, list, fetch, update and
//! delete their own tasks. Task status is projected from the stored state and
//! the task's time window at read time.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: validation rules, status projection and task records
//! - **Ports**: the [`task::ports::TaskRepository`] storage trait
//! - **Adapters**: in-memory and Diesel/PostgreSQL repositories
//! - **Transport**: the axum router in [`http`]
//!
//! # Modules
//!
//! - [`task`]: task domain, storage ports, adapters and service
//! - [`http`]: routes, identity extraction and error mapping
//! - [`config`]: environment-driven configuration
//! - [`server`]: listener lifecycle and graceful shutdown
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;
