//! Runs against a real PostgreSQL instance when `GUESTBOOK_TEST_DATABASE_URL`
//! is set; otherwise every test returns early.
use core_types::NewGuestBookMessage;
use database::{DbError, DbRepository, MessageRepository};
use sqlx::PgPool;

async fn test_repository() -> Option<DbRepository> {
    let url = std::env::var("GUESTBOOK_TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.expect("connect to test database");
    Some(DbRepository::new(pool))
}

#[tokio::test]
async fn repository_round_trip_against_postgres() {
    let Some(repo) = test_repository().await else {
        eprintln!("GUESTBOOK_TEST_DATABASE_URL not set; skipping");
        return;
    };

    repo.ensure_schema().await.expect("schema");
    // A second call must be a no-op.
    repo.ensure_schema().await.expect("schema again");
    repo.ping().await.expect("ping");

    let before = repo.count().await.expect("count");
    let draft = NewGuestBookMessage {
        name: "Integration".to_string(),
        email: "integration@example.com".to_string(),
        message: "Written by the postgres test".to_string(),
    };
    let created = repo.insert(&draft).await.expect("insert");
    assert!(created.id > 0);
    assert_eq!(created.name, draft.name);
    assert_eq!(created.created_at, created.updated_at);
    assert_eq!(repo.count().await.expect("count"), before + 1);

    let fetched = repo.fetch_by_id(created.id).await.expect("fetch");
    assert_eq!(fetched, created);

    let newest = repo.fetch_page(1, 0).await.expect("page");
    assert_eq!(newest.len(), 1);
    assert!(newest[0].created_at >= created.created_at);

    let past_end = repo.fetch_page(10, before + 100).await.expect("page");
    assert!(past_end.is_empty());

    let missing = repo.fetch_by_id(i32::MAX).await.unwrap_err();
    assert!(matches!(missing, DbError::NotFound));
}
