//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL storage via SeaORM

pub mod database;
pub mod fixtures;

pub use database::{DatabaseConfig, InMemoryPostRepository};
pub use fixtures::StoreFixture;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
