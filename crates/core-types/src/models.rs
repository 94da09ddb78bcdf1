use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A guest book entry as it exists in the store.
///
/// `id`, `created_at` and `updated_at` are always assigned by the store; the
/// application never sets them itself.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct GuestBookMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Equal to `created_at` until an update path exists.
    pub updated_at: DateTime<Utc>,
}

/// The fields a client submits to create a message. Nothing here has been
/// validated yet.
///
/// Missing fields deserialize to empty strings so they are reported by the
/// length rules instead of being rejected as malformed JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewGuestBookMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}
