//! # Writer Infrastructure
//!
//! Concrete implementations of the repository ports defined in `writer-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All backends enabled
//! - `minimal` - In-memory store only
//! - `postgres` - PostgreSQL repository via SeaORM
//! - `rest` - Hosted `posts` table over its REST query interface

pub mod database;
pub mod fallback;
pub mod memory;
pub mod rest;

pub use database::DatabaseConfig;
pub use fallback::FallbackPostRepository;
pub use memory::InMemoryPostRepository;
pub use rest::RestConfig;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};

#[cfg(feature = "rest")]
pub use rest::{RestPostRepository, TableClient, TableError};
