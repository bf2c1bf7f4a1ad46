use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::errors::StudioError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StudioError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain-level error from the scrape/generate/save pipeline.
    #[error(transparent)]
    Studio(#[from] StudioError),

    /// Missing or invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A referenced resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request targeted a campaign generation that has been replaced.
    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Studio(studio) => match studio {
                StudioError::DomainNotAllowed(url) => (
                    StatusCode::BAD_REQUEST,
                    "DOMAIN_NOT_ALLOWED",
                    format!("URL is not on the storefront allowlist: {url}"),
                ),
                StudioError::ConfigError(msg) => {
                    tracing::error!(error = %msg, "Configuration error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "CONFIG_ERROR",
                        msg.clone(),
                    )
                }
                StudioError::ScrapeError(msg) => (
                    StatusCode::BAD_GATEWAY,
                    "SCRAPE_ERROR",
                    format!("Scrape error: {msg}"),
                ),
                StudioError::GeminiError(msg) => (
                    StatusCode::BAD_GATEWAY,
                    "GEMINI_ERROR",
                    format!("Gemini error: {msg}"),
                ),
                StudioError::NotionError(msg) => (
                    StatusCode::BAD_GATEWAY,
                    "NOTION_ERROR",
                    format!("Notion error: {msg}"),
                ),
                StudioError::HttpError(msg) => {
                    tracing::error!(error = %msg, "Outbound HTTP error");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        format!("Upstream request failed: {msg}"),
                    )
                }
            },

            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
