use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::RepoError;

/// Generic repository trait for lookups and removal by key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID.
    ///
    /// Returns `true` when a row was removed. A missing ID is not an error.
    async fn delete(&self, id: ID) -> Result<bool, RepoError>;
}

/// Post repository - the five operations the pages and API are built on.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, String> {
    /// All posts, newest `created_at` first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;

    /// Store a new post; the backend assigns `id` and `created_at`.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply a partial update. `Ok(None)` when no post has that ID.
    async fn update(&self, id: String, changes: PostChanges) -> Result<Option<Post>, RepoError>;
}
