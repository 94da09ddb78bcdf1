use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// A draft field is outside its allowed length. The message names the
    /// field and its bounds and is safe to show to clients.
    #[error("{0}")]
    ValidationFailed(String),

    #[error("invalid message ID: {0:?}")]
    InvalidIdentifier(String),

    #[error("guest book message not found")]
    NotFound,

    #[error("storage unavailable during {operation}: {source}")]
    StorageUnavailable {
        operation: &'static str,
        #[source]
        source: DbError,
    },
}
