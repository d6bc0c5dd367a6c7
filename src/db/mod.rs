//! Relational storage for tenants, users and campaign data.
//!
//! A single libsql-backed client serves every mode:
//! - **Memory**: ephemeral, used by tests and `database.url = ":memory:"`
//! - **SQLite**: local database file
//! - **Turso**: remote database (feature `turso`)

#![allow(missing_docs)]

pub mod traits;
pub mod turso;

pub use traits::{DatabaseClient, DatabaseProvider};
pub use turso::TursoClient;
