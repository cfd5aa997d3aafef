//! In-memory repository implementation - used as fallback when the database
//! is unavailable. Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use planner_core::domain::Post;
use planner_core::error::RepoError;
use planner_core::ports::{BaseRepository, PostRepository};

/// In-memory post store using a HashMap behind an async RwLock.
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn sorted_newest_first(mut posts: Vec<Post>) -> Vec<Post> {
        posts.sort_by_key(|p| Reverse((p.created_at, p.id)));
        posts
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;
        store.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        if store.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(Self::sorted_newest_first(store.values().cloned().collect()))
    }

    async fn search(&self, query: &str) -> Result<Vec<Post>, RepoError> {
        // Case-insensitive, matching the ILIKE semantics of the Postgres repo.
        let needle = query.to_lowercase();
        let store = self.store.read().await;
        let matches = store
            .values()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.content.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        Ok(Self::sorted_newest_first(matches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[tokio::test]
    async fn save_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = Post::new("Title", "Body", "Instagram", "Draft");
        let saved = repo.save(post.clone()).await.unwrap();

        let found = repo.find_by_id(saved.id).await.unwrap();
        assert_eq!(found.unwrap().title, "Title");
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryPostRepository::new();
        let err = repo.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn list_recent_orders_newest_first() {
        let repo = InMemoryPostRepository::new();

        let mut old = Post::new("old", "b", "Twitter", "Draft");
        old.created_at = Some(Utc::now() - Duration::hours(2));
        let mut new = Post::new("new", "b", "Twitter", "Draft");
        new.created_at = Some(Utc::now());

        repo.save(old).await.unwrap();
        repo.save(new.clone()).await.unwrap();

        let listed = repo.list_recent().await.unwrap();
        assert_eq!(listed[0].id, new.id);
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn search_matches_title_or_content_ignoring_case() {
        let repo = InMemoryPostRepository::new();
        repo.save(Post::new("Summer sale", "big discounts", "Facebook", "Draft"))
            .await
            .unwrap();
        repo.save(Post::new("Weekly digest", "summer reading list", "LinkedIn", "Draft"))
            .await
            .unwrap();
        repo.save(Post::new("Unrelated", "nothing here", "Twitter", "Draft"))
            .await
            .unwrap();

        // "summer" matches the capitalized title and the lower-case content.
        let hits = repo.search("summer").await.unwrap();
        assert_eq!(hits.len(), 2);
        let hits = repo.search("SALE").await.unwrap();
        assert_eq!(hits.len(), 1);
        let hits = repo.search("missing").await.unwrap();
        assert!(hits.is_empty());
    }
}
