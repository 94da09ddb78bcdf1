pub mod models;
pub mod pagination;

// Re-export the core types to provide a clean public API.
pub use models::{GuestBookMessage, NewGuestBookMessage};
pub use pagination::Pagination;
