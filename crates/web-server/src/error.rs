use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use service::ServiceError;
use thiserror::Error;

/// Client-facing message for any store failure. Driver details stay in the logs.
pub const STORAGE_ERROR_MESSAGE: &str = "An internal database error occurred";

#[derive(Error, Debug)]
pub enum AppError {
    /// The body could not be decoded into a draft.
    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] JsonRejection),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },
    #[error("Method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },
}

/// The JSON error envelope. Endpoint errors only carry `error`; the router
/// fallbacks also fill in `message`, `path` and `method`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl ErrorResponse {
    fn short(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: None,
            path: None,
            method: None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Service(ServiceError::ValidationFailed(_)) => StatusCode::BAD_REQUEST,
            // An unparsable id is reported exactly like a missing one.
            AppError::Service(ServiceError::InvalidIdentifier(_) | ServiceError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            AppError::Service(ServiceError::StorageUnavailable { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn body(&self) -> ErrorResponse {
        match self {
            AppError::MalformedRequest(_) => ErrorResponse::short("Invalid request body"),
            AppError::Service(ServiceError::ValidationFailed(msg)) => ErrorResponse::short(msg.clone()),
            AppError::Service(ServiceError::InvalidIdentifier(_) | ServiceError::NotFound) => {
                ErrorResponse::short("Message not found")
            }
            AppError::Service(ServiceError::StorageUnavailable { .. }) => {
                ErrorResponse::short(STORAGE_ERROR_MESSAGE)
            }
            AppError::RouteNotFound { method, path } => ErrorResponse {
                error: "Not Found".to_string(),
                message: Some("The requested resource was not found".to_string()),
                path: Some(path.clone()),
                method: Some(method.clone()),
            },
            AppError::MethodNotAllowed { method, path } => ErrorResponse {
                error: "Method Not Allowed".to_string(),
                message: Some("The request method is not supported for this resource".to_string()),
                path: Some(path.clone()),
                method: Some(method.clone()),
            },
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Service(ServiceError::StorageUnavailable { .. }) => {
                // Already logged with its operation where it happened.
                tracing::error!(error = %self, "Request failed on storage");
            }
            AppError::RouteNotFound { method, path } => {
                tracing::warn!(%method, %path, "Route not found");
            }
            AppError::MethodNotAllowed { method, path } => {
                tracing::warn!(%method, %path, "Method not allowed");
            }
            _ => tracing::debug!(error = %self, "Request rejected"),
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::DbError;

    #[test]
    fn service_errors_map_to_expected_statuses() {
        let validation = AppError::from(ServiceError::ValidationFailed(
            "name must be between 2 and 100 characters".to_string(),
        ));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.body().error, "name must be between 2 and 100 characters");

        let invalid = AppError::from(ServiceError::InvalidIdentifier("abc".to_string()));
        assert_eq!(invalid.status(), StatusCode::NOT_FOUND);
        assert_eq!(invalid.body().error, "Message not found");

        let missing = AppError::from(ServiceError::NotFound);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.body(), invalid.body());
    }

    #[test]
    fn storage_errors_hide_driver_details() {
        let err = AppError::from(ServiceError::StorageUnavailable {
            operation: "count",
            source: DbError::ConnectionConfigError("password authentication failed".to_string()),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_string(&err.body()).unwrap();
        assert!(!body.contains("password"));
        assert!(body.contains(STORAGE_ERROR_MESSAGE));
    }

    #[test]
    fn fallback_errors_use_the_full_envelope() {
        let err = AppError::MethodNotAllowed {
            method: "DELETE".to_string(),
            path: "/api/v1/guestbook".to_string(),
        };
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = serde_json::to_value(err.body()).unwrap();
        assert_eq!(body["error"], "Method Not Allowed");
        assert_eq!(body["path"], "/api/v1/guestbook");
        assert_eq!(body["method"], "DELETE");
        assert!(body["message"].is_string());
    }

    #[test]
    fn short_envelope_omits_optional_fields() {
        let body = serde_json::to_value(ErrorResponse::short("Message not found")).unwrap();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["error"], "Message not found");
    }
}
