//! API error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use farm_apr_domain::AprError;
use tracing::error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The APR pipeline failed.
    #[error(transparent)]
    Apr(#[from] AprError),
    /// The result could not be encoded.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code returned for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Apr(AprError::UpstreamUnavailable(_)) => StatusCode::BAD_GATEWAY,
            Self::Apr(AprError::MissingPrice(_)) => StatusCode::BAD_GATEWAY,
            Self::Apr(AprError::ChainRead(_)) => StatusCode::BAD_GATEWAY,
            Self::Apr(AprError::DivisionByZero(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Apr(AprError::UnknownPool(_)) => StatusCode::NOT_FOUND,
            Self::Apr(AprError::InvalidInput(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Apr(e) => e.kind(),
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, kind = self.kind(), "Request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "code": status.as_u16()
        });

        (status, axum::Json(body)).into_response()
    }
}
