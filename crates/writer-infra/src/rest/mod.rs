//! Hosted `posts` table reached through its REST query interface.

mod config;

#[cfg(feature = "rest")]
mod client;
#[cfg(feature = "rest")]
mod repository;

pub use config::RestConfig;

#[cfg(feature = "rest")]
pub use client::{QueryBuilder, TableClient, TableError};
#[cfg(feature = "rest")]
pub use repository::RestPostRepository;

#[cfg(feature = "rest")]
#[cfg(test)]
mod tests;
