//! # Database Crate
//!
//! The Record Store for safeguarding concerns. Everything above this crate
//! talks to the [`ConcernStore`] trait and never sees SQL.
//!
//! ## Backends
//!
//! - `DbRepository`: PostgreSQL through a `sqlx` connection pool. Schema is
//!   managed by the embedded migrations in `./migrations`.
//! - `InMemoryConcernStore`: a process-local store used for tests and for
//!   running the API without a database.
//!
//! ## Public API
//!
//! - `connect`: establishes the database connection pool.
//! - `run_migrations`: applies the embedded migrations.
//! - `ConcernStore` / `ConcernField`: the store contract and its filterable columns.
//! - `DbError`: the errors returned from this crate.

pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryConcernStore;
pub use repository::DbRepository;
pub use store::{ConcernField, ConcernStore};
