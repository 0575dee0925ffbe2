//! In-memory post store - the fallback when the primary backend is unreachable.

mod fixtures;
mod posts;

pub use fixtures::fixture_posts;
pub use posts::InMemoryPostRepository;
