//! PostgreSQL persistence adapter using Diesel ORM.
//!
//! Concrete implementation of the [`crate::domain::Storage`] façade backed
//! by PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the storage implementation only translates between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are internal implementation details, never
//!   exposed to the domain layer.
//! - **Strongly typed errors**: all database errors are mapped to
//!   [`crate::domain::StorageError`] variants; unique-constraint violations
//!   surface as conflicts.

mod diesel_storage;
mod error_mapping;
pub mod migrations;
mod models;
mod pool;
pub(crate) mod schema;

pub use diesel_storage::DieselStorage;
pub use pool::{DbPool, PoolConfig, PoolError};
