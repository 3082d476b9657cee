use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use colloquy_core::OrchestrateError;
use colloquy_gateway::{ErrorClass, GatewayError};
use colloquy_store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Thread not found: {0}")]
    ThreadNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Orchestrate(#[from] OrchestrateError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Stable machine-readable code plus transport status for each kind.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::ThreadNotFound(_) => (StatusCode::NOT_FOUND, "thread_not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Orchestrate(err) => match err {
                OrchestrateError::ThreadNotFound(_) => {
                    (StatusCode::NOT_FOUND, "thread_not_found")
                }
                OrchestrateError::RunInProgress(_) => (StatusCode::CONFLICT, "run_in_progress"),
                OrchestrateError::EmptyUserText(_) => (StatusCode::BAD_REQUEST, "empty_prompt"),
                OrchestrateError::GatewayUnavailable { .. } => {
                    (StatusCode::BAD_GATEWAY, "gateway_unavailable")
                }
                OrchestrateError::RunFailed { .. } => (StatusCode::BAD_GATEWAY, "run_failed"),
                OrchestrateError::RunTimeout { .. } => {
                    (StatusCode::GATEWAY_TIMEOUT, "run_timeout")
                }
                OrchestrateError::NoAssistantReply(_) => {
                    (StatusCode::BAD_GATEWAY, "no_assistant_reply")
                }
                OrchestrateError::Store(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage_error")
                }
            },
            ApiError::Gateway(err) => match err.class() {
                ErrorClass::NotFound => (StatusCode::NOT_FOUND, "thread_not_found"),
                _ => (StatusCode::BAD_GATEWAY, "gateway_unavailable"),
            },
            ApiError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    /// Retry classification forwarded from the gateway, when one applies.
    fn classification(&self) -> Option<ErrorClass> {
        match self {
            ApiError::Orchestrate(OrchestrateError::GatewayUnavailable { class, .. }) => {
                Some(*class)
            }
            ApiError::Gateway(err) => Some(err.class()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let classification = self.classification();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, code, "request failed");
            "Internal server error".to_string()
        } else {
            if status.is_server_error() {
                tracing::warn!(error = %self, code, "upstream failure");
            }
            self.to_string()
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(class) = classification {
            error["classification"] = json!(class.to_string());
        }

        let body = Json(json!({ "error": error }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
