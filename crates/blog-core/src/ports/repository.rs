use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostPatch};
use crate::error::RepoError;

/// Post repository - the persistence contract for blog posts.
///
/// Absence is a value, not an error: lookups return `Option` and deletes
/// return whether anything was removed. `update` and `delete_by_id` are single
/// atomic operations, never a read followed by a write.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Assign `id` and `created`, then persist.
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError>;

    /// Insert each draft independently, one outcome per draft in input order.
    async fn insert_batch(&self, drafts: Vec<PostDraft>) -> Vec<Result<Post, RepoError>> {
        let mut results = Vec::with_capacity(drafts.len());
        for draft in drafts {
            results.push(self.insert(draft).await);
        }
        results
    }

    /// All live posts, oldest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Apply `patch` to the post, returning the updated record.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError>;

    /// Returns `true` if a post was actually removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Remove every post. Returns how many were removed.
    async fn drop_all(&self) -> Result<u64, RepoError>;
}
