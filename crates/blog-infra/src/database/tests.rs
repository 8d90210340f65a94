use std::sync::Arc;

use blog_core::domain::{Author, Post, PostDraft, PostPatch};
use blog_core::ports::PostRepository;
use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::database::entity::post;
use crate::database::PostgresPostRepository;

fn model(id: Uuid, title: &str) -> post::Model {
    post::Model {
        id,
        author_first_name: "Jo".to_owned(),
        author_last_name: "Ng".to_owned(),
        title: title.to_owned(),
        content: "C".to_owned(),
        created: Utc::now().into(),
    }
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "Test Post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post: Post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author.last_name, "Ng");
}

#[tokio::test]
async fn test_find_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_returns_stored_record() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "T")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let draft = PostDraft {
        author: Author {
            first_name: "Jo".to_owned(),
            last_name: "Ng".to_owned(),
        },
        title: "T".to_owned(),
        content: "C".to_owned(),
    };
    let post = repo.insert(draft).await.unwrap();

    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "T");
}

#[tokio::test]
async fn test_update_returns_new_row() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "T2")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let patch = PostPatch {
        title: Some("T2".to_owned()),
        ..Default::default()
    };
    let post = repo.update(post_id, patch).await.unwrap().unwrap();

    assert_eq!(post.title, "T2");
    assert_eq!(post.content, "C");
}

#[tokio::test]
async fn test_update_unknown_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let patch = PostPatch {
        content: Some("C2".to_owned()),
        ..Default::default()
    };
    assert!(repo.update(Uuid::new_v4(), patch).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_reports_removal() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(1), exec(0)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let id = Uuid::new_v4();

    assert!(repo.delete_by_id(id).await.unwrap());
    assert!(!repo.delete_by_id(id).await.unwrap());
}

#[tokio::test]
async fn test_drop_all_counts_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([exec(3)])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert_eq!(repo.drop_all().await.unwrap(), 3);
}

/// Recover the mock connection from a repository and render its logged SQL.
fn logged_sql(repo: PostgresPostRepository) -> Vec<String> {
    let db = Arc::try_unwrap(repo.db)
        .ok()
        .expect("repository holds the only handle");
    db.into_transaction_log()
        .iter()
        .map(|txn| format!("{txn:?}").replace("\\\"", "\""))
        .collect()
}

fn set_clause(sql: &str) -> &str {
    let after_set = sql.split(" SET ").nth(1).expect("UPDATE has a SET clause");
    after_set.split(" WHERE ").next().unwrap()
}

#[tokio::test]
async fn test_update_is_single_returning_statement() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "T2")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let patch = PostPatch {
        title: Some("T2".to_owned()),
        ..Default::default()
    };
    repo.update(post_id, patch).await.unwrap().unwrap();

    let log = logged_sql(repo);
    assert_eq!(log.len(), 1);
    let sql = &log[0];
    assert!(sql.contains(r#"UPDATE "blog_posts" SET"#), "{sql}");
    assert!(sql.contains("RETURNING"), "{sql}");
    assert!(!sql.contains("SELECT"), "{sql}");
    assert_eq!(set_clause(sql), r#""title" = $1"#);
}

#[tokio::test]
async fn test_update_author_sets_both_names_only() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "T")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let patch = PostPatch {
        author: Some(Author {
            first_name: "Ana".to_owned(),
            last_name: "Li".to_owned(),
        }),
        ..Default::default()
    };
    repo.update(post_id, patch).await.unwrap().unwrap();

    let log = logged_sql(repo);
    assert_eq!(log.len(), 1);
    let set = set_clause(&log[0]);
    assert_eq!(set, r#""author_first_name" = $1, "author_last_name" = $2"#);
    assert!(!set.contains(r#""created""#));
    assert!(!set.contains(r#""id""#));
}

#[tokio::test]
async fn test_shared_pool_serves_repository() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![model(post_id, "Shared")]])
        .into_connection();
    let pool = Arc::new(db);

    let repo = PostgresPostRepository::shared(Arc::clone(&pool));
    let post = repo.find_by_id(post_id).await.unwrap().unwrap();

    assert_eq!(post.title, "Shared");
    assert_eq!(Arc::strong_count(&pool), 2);
}

#[tokio::test]
async fn test_find_all_orders_by_created_then_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_all().await.unwrap().is_empty());

    let log = logged_sql(repo);
    assert!(
        log[0].contains(r#"ORDER BY "blog_posts"."created" ASC, "blog_posts"."id" ASC"#),
        "{}",
        log[0]
    );
}
