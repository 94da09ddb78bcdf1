//! Process-local [`MessageRepository`].
//!
//! Mirrors the PostgreSQL behavior closely enough to exercise the service and
//! HTTP layers without a database: ids start at 1 and are never reused, both
//! timestamps are set at insert, and pages are ordered newest first with ties
//! broken by descending id. Nothing survives a restart.
use crate::DbError;
use crate::repository::MessageRepository;
use async_trait::async_trait;
use chrono::Utc;
use core_types::{GuestBookMessage, NewGuestBookMessage};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    // Kept in insertion order; sorted on read.
    messages: Vec<GuestBookMessage>,
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    state: RwLock<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an already persisted row as-is. Useful for seeding fixtures
    /// with specific timestamps.
    pub async fn seed(&self, message: GuestBookMessage) {
        let mut state = self.state.write().await;
        state.next_id = state.next_id.max(message.id);
        state.messages.push(message);
    }
}

#[async_trait]
impl MessageRepository for InMemoryRepository {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn insert(&self, draft: &NewGuestBookMessage) -> Result<GuestBookMessage, DbError> {
        let mut state = self.state.write().await;
        let id = state
            .next_id
            .checked_add(1)
            .ok_or(DbError::IdsExhausted("guest_book_messages"))?;
        state.next_id = id;
        let now = Utc::now();
        let message = GuestBookMessage {
            id,
            name: draft.name.clone(),
            email: draft.email.clone(),
            message: draft.message.clone(),
            created_at: now,
            updated_at: now,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn fetch_by_id(&self, id: i32) -> Result<GuestBookMessage, DbError> {
        let state = self.state.read().await;
        state
            .messages
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<GuestBookMessage>, DbError> {
        let state = self.state.read().await;
        let mut ordered: Vec<&GuestBookMessage> = state.messages.iter().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(ordered.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let state = self.state.read().await;
        Ok(state.messages.len() as i64)
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
