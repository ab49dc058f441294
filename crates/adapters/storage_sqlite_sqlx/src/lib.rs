//! # irhub-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `StateStore` port defined in `irhub-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between restore snapshots and database rows
//!
//! ## Dependency rule
//! Depends on `irhub-app` (for port traits) and `irhub-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod error;
pub mod pool;
pub mod state_store;

pub use pool::{Config, Database};
pub use state_store::SqliteStateStore;
