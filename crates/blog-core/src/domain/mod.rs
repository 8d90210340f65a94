//! Domain entities - the core business objects.

mod post;

pub use post::{Author, AuthorFields, Post, PostDraft, PostFields, PostPatch};
