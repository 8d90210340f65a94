//! In-memory post repository - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, PostDraft, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

#[derive(Default)]
struct PostTable {
    posts: HashMap<Uuid, Post>,
    last_created: Option<DateTime<Utc>>,
}

impl PostTable {
    /// Next creation timestamp, strictly after every one handed out before.
    fn next_created(&mut self) -> DateTime<Utc> {
        let now = Utc::now().trunc_subsecs(6);
        let created = match self.last_created {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_created = Some(created);
        created
    }
}

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Every mutation happens under a single write guard, so readers see either the
/// old or the new record, never a mix. Data is lost on process restart.
pub struct InMemoryPostRepository {
    store: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(PostTable::default()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        let id = Uuid::new_v4();
        if store.posts.contains_key(&id) {
            return Err(RepoError::Constraint(format!("Post {} already exists", id)));
        }

        let post = Post::new(draft, id, store.next_created());
        store.posts.insert(id, post.clone());
        tracing::debug!(post_id = %id, "Inserted post");

        Ok(post)
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let store = self.store.read().await;
        let mut posts: Vec<Post> = store.posts.values().cloned().collect();
        posts.sort_by(|a, b| a.created.cmp(&b.created).then_with(|| a.id.cmp(&b.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.posts.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        let Some(post) = store.posts.get_mut(&id) else {
            return Ok(None);
        };

        post.apply(patch);
        tracing::debug!(post_id = %id, "Updated post");

        Ok(Some(post.clone()))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let mut store = self.store.write().await;
        let removed = store.posts.remove(&id).is_some();
        tracing::debug!(post_id = %id, removed, "Deleted post");
        Ok(removed)
    }

    async fn drop_all(&self) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let count = store.posts.len() as u64;
        store.posts.clear();
        Ok(count)
    }
}
