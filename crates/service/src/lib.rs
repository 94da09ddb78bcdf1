//! Guest book use cases: validation, page normalization and orchestration of
//! the repository calls behind each HTTP operation.
use async_trait::async_trait;
use core_types::{GuestBookMessage, NewGuestBookMessage};

pub mod error;
pub mod manager;
pub mod pagination;
pub mod validation;

pub use error::ServiceError;
pub use manager::GuestBookService;
pub use pagination::PageRequest;

/// One page of messages together with the normalized request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePage {
    pub messages: Vec<GuestBookMessage>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

/// The operations the HTTP layer depends on.
///
/// [`GuestBookService`] is the real implementation; tests substitute their own.
#[async_trait]
pub trait GuestBook: Send + Sync {
    async fn create_message(&self, draft: NewGuestBookMessage)
    -> Result<GuestBookMessage, ServiceError>;

    async fn list_messages(&self, page: i64, page_size: i64) -> Result<MessagePage, ServiceError>;

    async fn get_message_by_id(&self, id: &str) -> Result<GuestBookMessage, ServiceError>;

    /// Startup only.
    async fn initialize_schema(&self) -> Result<(), ServiceError>;

    async fn check_storage(&self) -> Result<(), ServiceError>;
}
