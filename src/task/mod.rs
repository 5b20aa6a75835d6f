//! User-owned task management.
//!
//! Callers create, list, fetch, update and delete tasks with a title, an
//! optional description and a date window. Writes are validated against the
//! current time and reads report a status projected from the window. The
//! module follows hexagonal architecture:
//!
//! - Domain types, validation and projection in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
