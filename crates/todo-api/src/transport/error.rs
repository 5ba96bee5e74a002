use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::TodoError;
use shared::AuthError;
use thiserror::Error;

/// HTTP 境界で扱うエラー
///
/// ステータスコードへの対応付けはこの層だけが行う。
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing parameter")]
    MissingParameter,

    #[error("Unauthorized: {0}")]
    Unauthenticated(#[from] AuthError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Todo(#[from] TodoError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Todo(TodoError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Todo(TodoError::InconsistentIds { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Todo(TodoError::Backend(_) | TodoError::Internal(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
            self.to_string()
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
