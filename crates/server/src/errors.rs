use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{debug, error};

/// HTTP-facing error. Renders as `{"detail": "..."}` with the matching status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Rejected { status: StatusCode::UNPROCESSABLE_ENTITY, detail: detail.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let detail = e.detail().to_string();
        match e {
            ServiceError::Validation(_) => Self::validation(detail),
            ServiceError::NotFound(_) => Self::NotFound(detail),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(r: PathRejection) -> Self {
        match r {
            PathRejection::FailedToDeserializePathParams(e) => Self::validation(e.body_text()),
            other => Self::Rejected { status: other.status(), detail: other.body_text() },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        match r {
            QueryRejection::FailedToDeserializeQueryString(e) => Self::validation(e.body_text()),
            other => Self::Rejected { status: other.status(), detail: other.body_text() },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        Self::Rejected { status: r.status(), detail: r.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        if status.is_server_error() {
            error!(status = %status, error = %msg, "request failed");
        } else {
            debug!(status = %status, detail = %msg, "request rejected");
        }
        (status, Json(serde_json::json!({"detail": msg}))).into_response()
    }
}
