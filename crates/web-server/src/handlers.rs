use crate::{error::AppError, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path,
        Query,
        State,
    },
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};
use core_types::{GuestBookMessage, NewGuestBookMessage, Pagination};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Raw listing parameters. Kept as text so that junk like `?page=abc`
/// behaves as if the parameter were absent instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    page: Option<String>,
    page_size: Option<String>,
}

impl ListParams {
    /// Unparsable or missing values become 0, which the service clamps to its defaults.
    fn numbers(&self) -> (i64, i64) {
        (parse_param(self.page.as_deref()), parse_param(self.page_size.as_deref()))
    }
}

fn parse_param(value: Option<&str>) -> i64 {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(0)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub messages: Vec<GuestBookMessage>,
    pub pagination: Pagination,
}

/// # GET /
/// Describes the API and its endpoints.
pub async fn api_info() -> Json<Value> {
    tracing::debug!("Received request on API info endpoint");
    Json(json!({
        "name": "Guest Book API",
        "version": "v1",
        "description": "A simple guest book API for managing messages",
        "endpoints": {
            "GET /": "API information",
            "GET /health": "Basic health check",
            "GET /api/v1/health": "Health check with database connectivity",
            "GET /api/v1/guestbook": "Get all guest book messages (supports pagination: ?page=1&page_size=10)",
            "POST /api/v1/guestbook": "Create a new guest book message",
            "GET /api/v1/guestbook/{id}": "Get a specific guest book message by ID",
        },
        "example_request": {
            "POST /api/v1/guestbook": {
                "name": "John Doe",
                "email": "john.doe@example.com",
                "message": "Hello! This is my message in the guest book.",
            }
        }
    }))
}

/// # GET /health
/// Liveness only; never touches the database.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// # GET /api/v1/health
pub async fn health_with_store(State(state): State<AppState>) -> impl IntoResponse {
    match state.guestbook.check_storage().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "healthy", "database": "connected" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "error": "Database connection failed" })),
            )
        }
    }
}

/// # GET /api/v1/guestbook
pub async fn list_messages(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ListMessagesResponse>, AppError> {
    let params = params.map(|Query(p)| p).unwrap_or_default();
    let (page, page_size) = params.numbers();

    let result = state.guestbook.list_messages(page, page_size).await?;
    Ok(Json(ListMessagesResponse {
        pagination: Pagination::new(result.page, result.page_size, result.total),
        messages: result.messages,
    }))
}

/// # POST /api/v1/guestbook
pub async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<NewGuestBookMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<GuestBookMessage>), AppError> {
    let Json(draft) = payload?;
    let message = state.guestbook.create_message(draft).await?;
    tracing::info!(id = message.id, name = %message.name, "Created new guest book message");
    Ok((StatusCode::CREATED, Json(message)))
}

/// # GET /api/v1/guestbook/:id
/// Only digit sequences count as a match for `:id`; anything else is answered
/// exactly like an unknown route.
pub async fn get_message(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<GuestBookMessage>, AppError> {
    let id = match id {
        Ok(Path(id)) if is_digit_sequence(&id) => id,
        _ => {
            return Err(AppError::RouteNotFound {
                method: method.to_string(),
                path: uri.path().to_string(),
            });
        }
    };

    let message = state.guestbook.get_message_by_id(&id).await?;
    Ok(Json(message))
}

fn is_digit_sequence(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Router-wide fallback for unknown paths.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Method fallback for `/api/v1/guestbook/:id`. A non-digit id never matched
/// the route, so it is reported as unknown rather than as a bad method.
pub async fn message_method_not_allowed(
    method: Method,
    uri: Uri,
    id: Result<Path<String>, PathRejection>,
) -> AppError {
    let method = method.to_string();
    let path = uri.path().to_string();
    match id {
        Ok(Path(id)) if is_digit_sequence(&id) => AppError::MethodNotAllowed { method, path },
        _ => AppError::RouteNotFound { method, path },
    }
}
