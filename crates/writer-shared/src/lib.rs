//! # Writer Shared
//!
//! Wire types of the Post Writer JSON API.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
