#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::Router;
use core_types::{GuestBookMessage, NewGuestBookMessage};
use database::{DbError, InMemoryRepository};
use service::{GuestBook, GuestBookService, MessagePage, ServiceError};
use std::sync::Arc;
use std::time::Duration;
use web_server::{build_router, AppState};

pub fn app_with_repository(repo: Arc<InMemoryRepository>) -> Router {
    let guestbook = GuestBookService::new(repo, Duration::from_secs(5));
    build_router(AppState {
        guestbook: Arc::new(guestbook),
    })
}

pub fn app() -> Router {
    app_with_repository(Arc::new(InMemoryRepository::new()))
}

/// Router backed by a guest book whose store is always down.
pub fn broken_app() -> Router {
    build_router(AppState {
        guestbook: Arc::new(UnavailableGuestBook),
    })
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    raw_request(method, uri, body.to_string())
}

pub fn raw_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .expect("request")
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

fn unavailable(operation: &'static str) -> ServiceError {
    ServiceError::StorageUnavailable {
        operation,
        source: DbError::Timeout(Duration::from_millis(1)),
    }
}

pub struct UnavailableGuestBook;

#[async_trait]
impl GuestBook for UnavailableGuestBook {
    async fn create_message(
        &self,
        _draft: NewGuestBookMessage,
    ) -> Result<GuestBookMessage, ServiceError> {
        Err(unavailable("insert"))
    }

    async fn list_messages(&self, _page: i64, _page_size: i64) -> Result<MessagePage, ServiceError> {
        Err(unavailable("fetch_page"))
    }

    async fn get_message_by_id(&self, _id: &str) -> Result<GuestBookMessage, ServiceError> {
        Err(unavailable("fetch_by_id"))
    }

    async fn initialize_schema(&self) -> Result<(), ServiceError> {
        Err(unavailable("ensure_schema"))
    }

    async fn check_storage(&self) -> Result<(), ServiceError> {
        Err(unavailable("ping"))
    }
}
