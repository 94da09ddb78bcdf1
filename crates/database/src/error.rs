use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),

    #[error("Database operation failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("The requested data was not found in the database.")]
    NotFound,

    #[error("No identifiers left for table {0}")]
    IdsExhausted(&'static str),

    #[error("Database operation did not complete within {0:?}")]
    Timeout(Duration),
}
