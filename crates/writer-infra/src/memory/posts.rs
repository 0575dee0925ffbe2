//! In-memory post repository.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use writer_core::domain::{NewPost, Post, PostChanges};
use writer_core::error::RepoError;
use writer_core::ports::{BaseRepository, PostRepository};

use super::fixtures::fixture_posts;

/// Post store held in process memory behind an async RwLock.
///
/// Ids are sequential numeric strings. The counter only moves forward, so
/// an id freed by a delete is never handed out again.
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    next_id: AtomicU64,
}

impl InMemoryPostRepository {
    /// Empty store; the first created post gets id `"1"`.
    pub fn new() -> Self {
        Self::from_posts(Vec::new())
    }

    /// Store seeded with the development fixture posts.
    pub fn with_fixtures() -> Self {
        Self::from_posts(fixture_posts(Utc::now()))
    }

    pub fn from_posts(posts: Vec<Post>) -> Self {
        let highest = posts
            .iter()
            .filter_map(|p| p.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            .max(posts.len() as u64);

        Self {
            posts: RwLock::new(posts),
            next_id: AtomicU64::new(highest + 1),
        }
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, String> for InMemoryPostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn delete(&self, id: String) -> Result<bool, RepoError> {
        let mut posts = self.posts.write().await;
        match posts.iter().position(|p| p.id == id) {
            Some(index) => {
                posts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        Post::sort_newest_first(&mut posts);
        Ok(posts)
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed).to_string();
        let post = post.into_post(id, Utc::now());

        // Newest first, like the listing order.
        self.posts.write().await.insert(0, post.clone());

        tracing::debug!(post_id = %post.id, "Stored post in memory");
        Ok(post)
    }

    async fn update(&self, id: String, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        changes.apply(post);
        Ok(Some(post.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NewPost {
        NewPost::new(title, "Body", "user-1")
    }

    #[tokio::test]
    async fn test_fixtures_are_listed_newest_first() {
        let repo = InMemoryPostRepository::with_fixtures();
        let posts = repo.list_recent().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[1].id, "2");
        assert_eq!(posts[0].title, "はじめての投稿");
        assert_eq!(posts[1].title, "Next.jsについて");
        assert!(posts[0].created_at > posts[1].created_at);
    }

    #[tokio::test]
    async fn test_create_assigns_next_sequential_id() {
        let repo = InMemoryPostRepository::with_fixtures();
        let created = repo.create(draft("Third")).await.unwrap();

        assert_eq!(created.id, "3");
        let found = repo.find_by_id("3".to_string()).await.unwrap();
        assert_eq!(found, Some(created.clone()));

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts[0].id, created.id);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        let first = repo.create(draft("One")).await.unwrap();
        let second = repo.create(draft("Two")).await.unwrap();

        assert!(repo.delete(first.id.clone()).await.unwrap());
        let third = repo.create(draft("Three")).await.unwrap();

        assert_ne!(third.id, second.id);
        assert_ne!(third.id, first.id);
    }

    #[tokio::test]
    async fn test_update_preserves_id_and_timestamp() {
        let repo = InMemoryPostRepository::with_fixtures();
        let before = repo.find_by_id("2".to_string()).await.unwrap().unwrap();

        let updated = repo
            .update(
                "2".to_string(),
                PostChanges {
                    content: Some("Rewritten".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "Rewritten");
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_post_returns_none() {
        let repo = InMemoryPostRepository::new();
        let result = repo
            .update("42".to_string(), PostChanges::title_and_content("T", "C"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let repo = InMemoryPostRepository::with_fixtures();

        assert!(repo.delete("1".to_string()).await.unwrap());
        assert!(!repo.delete("1".to_string()).await.unwrap());

        let posts = repo.list_recent().await.unwrap();
        assert!(posts.iter().all(|p| p.id != "1"));
        assert_eq!(repo.len().await, 1);
    }
}
