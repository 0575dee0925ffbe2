//! # Writer Core
//!
//! The domain layer of Post Writer.
//! This crate holds the `Post` entity, its validation rules and the
//! repository ports; it has no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
