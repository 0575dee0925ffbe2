//! Primary backend with an in-memory fallback.
//!
//! Every call goes to the primary repository first. When it fails, the
//! failure is logged and the in-memory store answers instead. The two are
//! not reconciled afterwards: writes taken by the fallback stay in memory.
//!
//! Posts held only in memory stay addressable while the primary is healthy:
//! a primary miss on read, update or delete is retried against the
//! in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use writer_core::domain::{NewPost, Post, PostChanges};
use writer_core::error::RepoError;
use writer_core::ports::{BaseRepository, PostRepository};

use crate::memory::InMemoryPostRepository;

pub struct FallbackPostRepository {
    primary: Option<Arc<dyn PostRepository>>,
    fallback: Arc<InMemoryPostRepository>,
    degraded: AtomicBool,
}

impl FallbackPostRepository {
    pub fn new(
        primary: Option<Arc<dyn PostRepository>>,
        fallback: Arc<InMemoryPostRepository>,
    ) -> Self {
        Self {
            primary,
            fallback,
            degraded: AtomicBool::new(false),
        }
    }

    /// No primary backend: the in-memory store is the only store.
    pub fn memory_only(store: Arc<InMemoryPostRepository>) -> Self {
        Self::new(None, store)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// True while the most recent primary call failed.
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    pub fn fallback_store(&self) -> &Arc<InMemoryPostRepository> {
        &self.fallback
    }

    /// Unwrap a primary result, or log the failure and return `None` so the
    /// caller answers from the fallback store.
    fn primary_ok<T>(&self, operation: &'static str, result: Result<T, RepoError>) -> Option<T> {
        match result {
            Ok(value) => {
                if self.degraded.swap(false, Ordering::Relaxed) {
                    tracing::info!(operation, "Primary post backend recovered");
                }
                Some(value)
            }
            Err(e) => {
                self.degraded.store(true, Ordering::Relaxed);
                tracing::error!(operation, error = %e, "Primary post backend failed, using in-memory fallback");
                None
            }
        }
    }
}

#[async_trait]
impl BaseRepository<Post, String> for FallbackPostRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
        if let Some(primary) = &self.primary {
            let result = primary.find_by_id(id.clone()).await;
            // A miss also falls through: posts written during an outage only
            // exist in memory.
            if let Some(Some(post)) = self.primary_ok("find_by_id", result) {
                return Ok(Some(post));
            }
        }
        self.fallback.find_by_id(id).await
    }

    async fn delete(&self, id: String) -> Result<bool, RepoError> {
        if let Some(primary) = &self.primary {
            let result = primary.delete(id.clone()).await;
            if let Some(removed) = self.primary_ok("delete", result) {
                // Also drop any in-memory copy so later reads cannot resurrect it.
                let removed_locally = self.fallback.delete(id).await?;
                return Ok(removed || removed_locally);
            }
        }
        self.fallback.delete(id).await
    }
}

#[async_trait]
impl PostRepository for FallbackPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        if let Some(primary) = &self.primary {
            let result = primary.list_recent().await;
            if let Some(posts) = self.primary_ok("list_recent", result) {
                return Ok(posts);
            }
        }
        self.fallback.list_recent().await
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        if let Some(primary) = &self.primary {
            let result = primary.create(post.clone()).await;
            if let Some(created) = self.primary_ok("create", result) {
                return Ok(created);
            }
        }
        self.fallback.create(post).await
    }

    async fn update(&self, id: String, changes: PostChanges) -> Result<Option<Post>, RepoError> {
        if let Some(primary) = &self.primary {
            let result = primary.update(id.clone(), changes.clone()).await;
            if let Some(Some(updated)) = self.primary_ok("update", result) {
                return Ok(Some(updated));
            }
        }
        self.fallback.update(id, changes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend that is never reachable.
    struct Unreachable;

    #[async_trait]
    impl BaseRepository<Post, String> for Unreachable {
        async fn find_by_id(&self, _id: String) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn delete(&self, _id: String) -> Result<bool, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl PostRepository for Unreachable {
        async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }

        async fn create(&self, _post: NewPost) -> Result<Post, RepoError> {
            Err(RepoError::Query("insert failed".to_string()))
        }

        async fn update(
            &self,
            _id: String,
            _changes: PostChanges,
        ) -> Result<Option<Post>, RepoError> {
            Err(RepoError::Connection("connection refused".to_string()))
        }
    }

    /// Backend that can be taken down and brought back.
    struct Switchable {
        down: AtomicBool,
        inner: InMemoryPostRepository,
    }

    impl Switchable {
        fn down() -> Self {
            Self {
                down: AtomicBool::new(true),
                inner: InMemoryPostRepository::new(),
            }
        }

        fn check(&self) -> Result<(), RepoError> {
            if self.down.load(Ordering::Relaxed) {
                Err(RepoError::Connection("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl BaseRepository<Post, String> for Switchable {
        async fn find_by_id(&self, id: String) -> Result<Option<Post>, RepoError> {
            self.check()?;
            self.inner.find_by_id(id).await
        }

        async fn delete(&self, id: String) -> Result<bool, RepoError> {
            self.check()?;
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl PostRepository for Switchable {
        async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
            self.check()?;
            self.inner.list_recent().await
        }

        async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
            self.check()?;
            self.inner.create(post).await
        }

        async fn update(&self, id: String, changes: PostChanges) -> Result<Option<Post>, RepoError> {
            self.check()?;
            self.inner.update(id, changes).await
        }
    }

    fn degraded_repo() -> FallbackPostRepository {
        FallbackPostRepository::new(
            Some(Arc::new(Unreachable)),
            Arc::new(InMemoryPostRepository::with_fixtures()),
        )
    }

    #[tokio::test]
    async fn test_list_falls_back_to_fixtures() {
        let repo = degraded_repo();
        assert!(!repo.is_degraded());

        let posts = repo.list_recent().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert!(repo.is_degraded());
    }

    #[tokio::test]
    async fn test_crud_contract_holds_while_degraded() {
        let repo = degraded_repo();

        let created = repo
            .create(NewPost::new("Offline", "Written offline", "user-1"))
            .await
            .unwrap();
        assert_eq!(created.id, "3");

        let found = repo.find_by_id(created.id.clone()).await.unwrap();
        assert_eq!(found.as_ref().map(|p| p.title.as_str()), Some("Offline"));

        let updated = repo
            .update(
                created.id.clone(),
                PostChanges {
                    title: Some("Edited offline".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.content, "Written offline");
        assert_eq!(updated.created_at, created.created_at);

        repo.delete(created.id.clone()).await.unwrap();
        let posts = repo.list_recent().await.unwrap();
        assert!(posts.iter().all(|p| p.id != created.id));
    }

    #[tokio::test]
    async fn test_primary_miss_consults_fallback_store() {
        let primary = Arc::new(InMemoryPostRepository::new());
        let repo = FallbackPostRepository::new(
            Some(primary.clone()),
            Arc::new(InMemoryPostRepository::with_fixtures()),
        );

        let found = repo.find_by_id("1".to_string()).await.unwrap();

        assert!(found.is_some());
        assert!(!repo.is_degraded());
    }

    #[tokio::test]
    async fn test_memory_posts_can_be_edited_and_deleted_while_primary_is_healthy() {
        let fallback = Arc::new(InMemoryPostRepository::with_fixtures());
        let repo = FallbackPostRepository::new(
            Some(Arc::new(InMemoryPostRepository::new())),
            fallback.clone(),
        );

        let updated = repo
            .update("1".to_string(), PostChanges::title_and_content("Edited", "Body"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Edited");
        let stored = fallback.find_by_id("1".to_string()).await.unwrap().unwrap();
        assert_eq!(stored.title, "Edited");

        assert!(repo.delete("1".to_string()).await.unwrap());
        assert!(repo.find_by_id("1".to_string()).await.unwrap().is_none());
        assert!(!repo.is_degraded());
    }

    #[tokio::test]
    async fn test_update_missing_everywhere_returns_none() {
        let repo = FallbackPostRepository::new(
            Some(Arc::new(InMemoryPostRepository::new())),
            Arc::new(InMemoryPostRepository::with_fixtures()),
        );

        let result = repo
            .update("99".to_string(), PostChanges::title_and_content("T", "C"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!repo.delete("99".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_on_primary_also_drops_memory_copy() {
        let repo = FallbackPostRepository::new(
            Some(Arc::new(InMemoryPostRepository::with_fixtures())),
            Arc::new(InMemoryPostRepository::with_fixtures()),
        );

        assert!(repo.delete("2".to_string()).await.unwrap());

        assert!(repo.find_by_id("2".to_string()).await.unwrap().is_none());
        assert_eq!(repo.fallback_store().len().await, 1);
    }

    #[tokio::test]
    async fn test_degraded_flag_clears_when_primary_recovers() {
        let primary = Arc::new(Switchable::down());
        let repo = FallbackPostRepository::new(
            Some(primary.clone()),
            Arc::new(InMemoryPostRepository::with_fixtures()),
        );

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts.len(), 2);
        assert!(repo.is_degraded());

        primary.down.store(false, Ordering::Relaxed);

        let posts = repo.list_recent().await.unwrap();
        assert!(posts.is_empty());
        assert!(!repo.is_degraded());
    }

    #[tokio::test]
    async fn test_healthy_primary_is_authoritative() {
        let primary = Arc::new(InMemoryPostRepository::new());
        let fallback = Arc::new(InMemoryPostRepository::with_fixtures());
        let repo = FallbackPostRepository::new(Some(primary.clone()), fallback.clone());

        repo.create(NewPost::new("Remote", "Body", "user-1"))
            .await
            .unwrap();

        let posts = repo.list_recent().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Remote");
        assert_eq!(primary.len().await, 1);
        assert_eq!(fallback.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_only_uses_store_directly() {
        let repo = FallbackPostRepository::memory_only(Arc::new(InMemoryPostRepository::new()));

        assert!(!repo.has_primary());
        assert!(repo.list_recent().await.unwrap().is_empty());
        assert!(!repo.delete("missing".to_string()).await.unwrap());
        assert!(!repo.is_degraded());
    }
}
