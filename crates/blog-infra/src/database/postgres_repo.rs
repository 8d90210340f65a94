//! PostgreSQL repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnAcquireErr, DbConn, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use blog_core::domain::{Post, PostDraft, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
///
/// Updates and deletes are single statements keyed by id, so the database row
/// lock is the only concurrency primitive involved.
pub struct PostgresPostRepository {
    pub(super) db: Arc<DbConn>,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self::shared(Arc::new(db))
    }

    /// A repository on a pool owned elsewhere, e.g. by `DatabaseConnections`.
    pub fn shared(db: Arc<DbConn>) -> Self {
        Self { db }
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            RepoError::Timeout("Timed out acquiring a database connection".to_string())
        }
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("unique") {
                RepoError::Constraint("Post already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, draft: PostDraft) -> Result<Post, RepoError> {
        // Stamped from this host's clock: several servers on one database
        // order by their own clocks, and ties fall back to the id.
        let post = Post::new(draft, Uuid::new_v4(), Utc::now().trunc_subsecs(6));
        tracing::debug!(post_id = %post.id, "Inserting post");

        let active_model: post::ActiveModel = post.into();
        let model = active_model.insert(self.db.as_ref()).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        let result = PostEntity::find()
            .order_by_asc(post::Column::Created)
            .order_by_asc(post::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Option<Post>, RepoError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut query = PostEntity::update_many().filter(post::Column::Id.eq(id));
        if let Some(title) = patch.title {
            query = query.col_expr(post::Column::Title, Expr::value(title));
        }
        if let Some(content) = patch.content {
            query = query.col_expr(post::Column::Content, Expr::value(content));
        }
        if let Some(author) = patch.author {
            query = query
                .col_expr(post::Column::AuthorFirstName, Expr::value(author.first_name))
                .col_expr(post::Column::AuthorLastName, Expr::value(author.last_name));
        }

        // UPDATE ... RETURNING: one statement, no separate read.
        let updated = query
            .exec_with_returning(self.db.as_ref())
            .await
            .map_err(map_db_err)?;
        tracing::debug!(post_id = %id, rows = updated.len(), "Updated post");

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected > 0)
    }

    async fn drop_all(&self) -> Result<u64, RepoError> {
        let result = PostEntity::delete_many()
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
