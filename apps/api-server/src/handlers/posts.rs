//! Blog post resource handlers.

use actix_web::{HttpResponse, web};
use chrono::SecondsFormat;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{AuthorFields, Post, PostFields};
use blog_shared::dto::{
    AuthorPayload, AuthorResponse, CreatePostRequest, PostListResponse, PostResponse,
    UpdatePostRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn serialize(post: Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title,
        author: AuthorResponse {
            first_name: post.author.first_name,
            last_name: post.author.last_name,
        },
        content: post.content,
        created: post.created.to_rfc3339_opts(SecondsFormat::Micros, true),
    }
}

fn post_fields(
    title: Option<String>,
    content: Option<String>,
    author: Option<AuthorPayload>,
) -> PostFields {
    PostFields {
        title,
        content,
        author: author.map(|a| AuthorFields {
            first_name: a.first_name,
            last_name: a.last_name,
        }),
    }
}

fn not_found(id: &str) -> AppError {
    DomainError::NotFound {
        entity_type: "Post",
        id: id.to_string(),
    }
    .into()
}

/// A path segment that is not a valid id cannot name a stored post.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| not_found(raw))
}

fn same_id(path_id: &str, body_id: &str) -> bool {
    match (Uuid::parse_str(path_id), Uuid::parse_str(body_id)) {
        (Ok(a), Ok(b)) => a == b,
        _ => path_id == body_id,
    }
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.find_all().await?;

    Ok(HttpResponse::Ok().json(PostListResponse {
        blog_post: posts.into_iter().map(serialize).collect(),
    }))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let id = parse_id(&raw_id)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;

    Ok(HttpResponse::Ok().json(serialize(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let draft = post_fields(req.title, req.content, req.author).validate_for_create()?;

    let post = state.posts.insert(draft).await?;
    tracing::info!(post_id = %post.id, "Created post");

    Ok(HttpResponse::Created().json(serialize(post)))
}

/// PUT /posts/{id}
///
/// Only the fields present in the body are replaced; an `author` replaces
/// both names at once.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let req = body.into_inner();

    if let Some(body_id) = req.id {
        if !same_id(&raw_id, &body_id) {
            let err = DomainError::Conflict {
                path_id: raw_id,
                body_id,
            };
            tracing::warn!("{}", err);
            return Err(err.into());
        }
    }

    let patch = post_fields(req.title, req.content, req.author).validate_for_update()?;
    let id = parse_id(&raw_id)?;

    state
        .posts
        .update(id, patch)
        .await?
        .ok_or_else(|| not_found(&raw_id))?;
    tracing::info!(post_id = %id, "Updated post");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw_id = path.into_inner();
    let id = parse_id(&raw_id)?;

    if !state.posts.delete_by_id(id).await? {
        return Err(not_found(&raw_id));
    }
    tracing::info!(post_id = %id, "Deleted post");

    Ok(HttpResponse::NoContent().finish())
}
