use crate::error::ServiceError;
use crate::pagination::PageRequest;
use crate::validation::validate_draft;
use crate::{GuestBook, MessagePage};
use async_trait::async_trait;
use core_types::{GuestBookMessage, NewGuestBookMessage};
use database::{DbError, MessageRepository};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// The concrete implementation of the [`GuestBook`] use cases.
///
/// Each store call runs under `timeout`. When the deadline passes the call's
/// future is dropped, which aborts the in-flight query and releases its
/// connection, and the caller sees `StorageUnavailable`. Nothing is retried.
#[derive(Clone)]
pub struct GuestBookService {
    repo: Arc<dyn MessageRepository>,
    timeout: Duration,
}

impl GuestBookService {
    pub fn new(repo: Arc<dyn MessageRepository>, timeout: Duration) -> Self {
        Self { repo, timeout }
    }

    async fn storage<T, F>(&self, operation: &'static str, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, DbError>> + Send,
    {
        let source = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(DbError::NotFound)) => return Err(ServiceError::NotFound),
            Ok(Err(e)) => e,
            Err(_elapsed) => DbError::Timeout(self.timeout),
        };
        tracing::error!(operation, error = %source, "Storage operation failed");
        Err(ServiceError::StorageUnavailable { operation, source })
    }
}

#[async_trait]
impl GuestBook for GuestBookService {
    async fn create_message(
        &self,
        draft: NewGuestBookMessage,
    ) -> Result<GuestBookMessage, ServiceError> {
        validate_draft(&draft)?;
        self.storage("insert", self.repo.insert(&draft)).await
    }

    async fn list_messages(&self, page: i64, page_size: i64) -> Result<MessagePage, ServiceError> {
        let request = PageRequest::new(page, page_size);
        let messages = self
            .storage("fetch_page", self.repo.fetch_page(request.page_size, request.offset()))
            .await?;
        let total = self.storage("count", self.repo.count()).await?;

        Ok(MessagePage {
            messages,
            page: request.page,
            page_size: request.page_size,
            total,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn get_message_by_id(&self, id: &str) -> Result<GuestBookMessage, ServiceError> {
        let parsed: i32 = id
            .parse()
            .map_err(|_e| ServiceError::InvalidIdentifier(id.to_string()))?;
        self.storage("fetch_by_id", self.repo.fetch_by_id(parsed)).await
    }

    async fn initialize_schema(&self) -> Result<(), ServiceError> {
        self.storage("ensure_schema", self.repo.ensure_schema()).await?;
        tracing::info!("Database schema initialized");
        Ok(())
    }

    async fn check_storage(&self) -> Result<(), ServiceError> {
        self.storage("ping", self.repo.ping()).await
    }
}
