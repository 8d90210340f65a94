use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// The author of a post. Both names are always present once persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

/// Post entity - a persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl Post {
    /// Materialize a draft with the identity and timestamp assigned by the store.
    pub fn new(draft: PostDraft, id: Uuid, created: DateTime<Utc>) -> Self {
        Self {
            id,
            author: draft.author,
            title: draft.title,
            content: draft.content,
            created,
        }
    }

    /// Replace the fields present in `patch`. `id` and `created` are untouched.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
    }
}

/// A validated, not-yet-persisted post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// A validated update. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<Author>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author.is_none()
    }
}

/// Unvalidated author input as received from a client.
#[derive(Debug, Clone, Default)]
pub struct AuthorFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl AuthorFields {
    fn validate(self, violations: &mut Vec<String>) -> Option<Author> {
        let first_name = required(self.first_name, "author.firstName", violations);
        let last_name = required(self.last_name, "author.lastName", violations);
        Some(Author {
            first_name: first_name?,
            last_name: last_name?,
        })
    }
}

/// Unvalidated post input as received from a client.
///
/// Carries no `id` or `created`: whatever a client sends for those never
/// reaches the persistence layer.
#[derive(Debug, Clone, Default)]
pub struct PostFields {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorFields>,
}

impl PostFields {
    /// Check a creation payload, reporting every missing or empty field.
    pub fn validate_for_create(self) -> Result<PostDraft, ValidationError> {
        let mut violations = Vec::new();
        let title = required(self.title, "title", &mut violations);
        let content = required(self.content, "content", &mut violations);
        let author = self.author.unwrap_or_default().validate(&mut violations);

        match (title, content, author) {
            (Some(title), Some(content), Some(author)) => Ok(PostDraft {
                author,
                title,
                content,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }

    /// Check an update payload. Every field is optional, but a present field
    /// must be complete: an `author` needs both of its names.
    pub fn validate_for_update(self) -> Result<PostPatch, ValidationError> {
        let mut violations = Vec::new();
        let title = optional(self.title, "title", &mut violations);
        let content = optional(self.content, "content", &mut violations);
        let author = self
            .author
            .and_then(|author| author.validate(&mut violations));

        if !violations.is_empty() {
            return Err(ValidationError::new(violations));
        }

        Ok(PostPatch {
            title,
            content,
            author,
        })
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn required(value: Option<String>, field: &str, violations: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !is_blank(&v) => Some(v),
        _ => {
            violations.push(field.to_string());
            None
        }
    }
}

fn optional(value: Option<String>, field: &str, violations: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if is_blank(&v) => {
            violations.push(field.to_string());
            None
        }
        other => other,
    }
}
