use crate::DbError;
use async_trait::async_trait;
use core_types::{GuestBookMessage, NewGuestBookMessage};
use sqlx::postgres::PgPool;

/// Idempotent schema for the message table and its listing index.
const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS guest_book_messages (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(255) NOT NULL,
        message TEXT NOT NULL,
        created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW(),
        updated_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
    );

    CREATE INDEX IF NOT EXISTS idx_guest_book_created_at ON guest_book_messages(created_at DESC);
"#;

/// Data access for guest book messages.
///
/// Every method is a single statement against the store. Implementations
/// report a missing row as [`DbError::NotFound`] and everything else as a
/// store failure; they never retry.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Creates the table and index if they are missing. Safe to repeat.
    async fn ensure_schema(&self) -> Result<(), DbError>;

    /// Persists a validated draft and returns the stored row.
    async fn insert(&self, draft: &NewGuestBookMessage) -> Result<GuestBookMessage, DbError>;

    async fn fetch_by_id(&self, id: i32) -> Result<GuestBookMessage, DbError>;

    /// Newest first. Returns an empty page once `offset` runs past the end.
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<GuestBookMessage>, DbError>;

    async fn count(&self) -> Result<i64, DbError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), DbError>;
}

/// The `DbRepository` provides the PostgreSQL-backed [`MessageRepository`].
/// It encapsulates all SQL queries for the guest book.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for DbRepository {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, draft: &NewGuestBookMessage) -> Result<GuestBookMessage, DbError> {
        let message = sqlx::query_as::<_, GuestBookMessage>(
            r#"
            INSERT INTO guest_book_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at, updated_at
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.message)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    async fn fetch_by_id(&self, id: i32) -> Result<GuestBookMessage, DbError> {
        let message = sqlx::query_as::<_, GuestBookMessage>(
            r#"
            SELECT id, name, email, message, created_at, updated_at
            FROM guest_book_messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| if let sqlx::Error::RowNotFound = e { DbError::NotFound } else { e.into() })?;
        Ok(message)
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<GuestBookMessage>, DbError> {
        let messages = sqlx::query_as::<_, GuestBookMessage>(
            r#"
            SELECT id, name, email, message, created_at, updated_at
            FROM guest_book_messages
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    async fn count(&self) -> Result<i64, DbError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guest_book_messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
