//! Data Transfer Objects - request/response types for the posts API.
//!
//! Request fields are all optional so that validation can report every
//! missing field at once instead of failing on the first one.

use serde::{Deserialize, Serialize};

/// Author as sent by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Body of `POST /posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<AuthorPayload>,
}

/// Body of `PUT /posts/{id}`.
///
/// `id` is only read to check it against the path. Any `created` a client
/// sends is dropped during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub first_name: String,
    pub last_name: String,
}

/// Wire form of a stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub author: AuthorResponse,
    pub content: String,
    pub created: String,
}

/// Body of `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    #[serde(rename = "blogPost")]
    pub blog_post: Vec<PostResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_ignores_created() {
        let req: UpdatePostRequest = serde_json::from_str(
            r#"{"id":"abc","title":"T2","created":"2020-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(req.id.as_deref(), Some("abc"));
        assert_eq!(req.title.as_deref(), Some("T2"));
        assert!(req.author.is_none());
    }

    #[test]
    fn test_post_response_wire_keys() {
        let body = PostResponse {
            id: "1".into(),
            title: "T".into(),
            author: AuthorResponse {
                first_name: "Jo".into(),
                last_name: "Ng".into(),
            },
            content: "C".into(),
            created: "2024-01-01T00:00:00Z".into(),
        };
        let value = serde_json::to_value(PostListResponse {
            blog_post: vec![body],
        })
        .unwrap();

        let post = &value["blogPost"][0];
        let mut keys: Vec<_> = post.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["author", "content", "created", "id", "title"]);
        assert_eq!(post["author"]["firstName"], "Jo");
        assert_eq!(post["author"]["lastName"], "Ng");
    }
}
