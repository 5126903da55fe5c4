//! # portalhub-database
//!
//! PostgreSQL connection management, migrations, and the repositories that
//! implement the `portalhub-core` collaborator traits on top of sqlx.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
