//! Seeding and teardown of a post store, for tests and local development.
//!
//! Goes straight to the repository, bypassing the HTTP layer.

use std::sync::Arc;

use blog_core::domain::{Author, Post, PostDraft};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

const FIRST_NAMES: [&str; 5] = ["Ada", "Grace", "Linus", "Barbara", "Ken"];
const LAST_NAMES: [&str; 5] = ["Lovelace", "Hopper", "Torvalds", "Liskov", "Thompson"];

/// A deterministic, valid draft. Different `n` give different posts.
pub fn sample_draft(n: usize) -> PostDraft {
    PostDraft {
        author: Author {
            first_name: FIRST_NAMES[n % FIRST_NAMES.len()].to_string(),
            last_name: LAST_NAMES[(n / FIRST_NAMES.len()) % LAST_NAMES.len()].to_string(),
        },
        title: format!("Sample post #{}", n),
        content: format!("Body of sample post #{}.", n),
    }
}

/// A post store with a known set of seeded posts.
///
/// Create one per test with [`StoreFixture::init`] and hand it back with
/// [`StoreFixture::teardown`].
pub struct StoreFixture {
    repo: Arc<dyn PostRepository>,
    seeded: Vec<Post>,
}

impl StoreFixture {
    /// Seed `count` sample posts into `repo`.
    pub async fn init(repo: Arc<dyn PostRepository>, count: usize) -> Result<Self, RepoError> {
        tracing::info!(count, "Seeding post store");

        let drafts = (1..=count).map(sample_draft).collect();
        let seeded = repo
            .insert_batch(drafts)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { repo, seeded })
    }

    pub fn repo(&self) -> Arc<dyn PostRepository> {
        self.repo.clone()
    }

    pub fn seeded(&self) -> &[Post] {
        &self.seeded
    }

    /// Drop every post in the store, seeded or not.
    pub async fn teardown(self) -> Result<u64, RepoError> {
        tracing::warn!("Deleting all posts");
        self.repo.drop_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryPostRepository;

    #[tokio::test]
    async fn test_init_and_teardown() {
        let repo: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
        let fixture = StoreFixture::init(repo.clone(), 10).await.unwrap();

        assert_eq!(fixture.seeded().len(), 10);
        assert_eq!(repo.find_all().await.unwrap().len(), 10);

        assert_eq!(fixture.teardown().await.unwrap(), 10);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_sample_drafts_differ() {
        assert_ne!(sample_draft(1), sample_draft(2));
        assert!(!sample_draft(7).author.last_name.is_empty());
    }
}
