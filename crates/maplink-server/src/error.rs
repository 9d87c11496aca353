//! Error handling for the API server

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maplink::MaplinkError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No URL provided")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Coordinates not found in URL")]
    CoordinatesNotFound,

    #[error("Address not found")]
    AddressNotFound,

    #[error("Failed to unshorten URL: {0}")]
    Unshorten(String),

    #[error("Failed to fetch address from Nominatim: {0}")]
    ReverseGeocoding(String),

    #[error("Failed to fetch coordinates from Nominatim: {0}")]
    ForwardGeocoding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::MissingUrl | ApiError::CoordinatesNotFound => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL".to_string()),
            ApiError::AddressNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Unshorten(ref reason) => {
                error!("Unshortening failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to unshorten URL".to_string(),
                )
            }
            ApiError::ReverseGeocoding(ref reason) => {
                error!("Reverse geocoding failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch address from Nominatim".to_string(),
                )
            }
            ApiError::ForwardGeocoding(ref reason) => {
                error!("Forward geocoding failed: {}", reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to fetch coordinates from Nominatim".to_string(),
                )
            }
            ApiError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

// Convenience conversions for the two endpoints
impl ApiError {
    /// Map a library error raised while resolving a short link
    pub fn from_resolve(err: MaplinkError) -> Self {
        match err {
            MaplinkError::MissingInput { .. } => Self::MissingUrl,
            MaplinkError::InvalidUrl { reason, .. } => Self::InvalidUrl(reason),
            MaplinkError::CoordinatesNotFound { .. } => Self::CoordinatesNotFound,
            MaplinkError::Unshorten { reason, .. } => Self::Unshorten(reason),
            MaplinkError::Geocoding(e) => Self::ReverseGeocoding(e.to_string()),
            other @ MaplinkError::Config { .. } => Self::Internal(other.to_string()),
        }
    }

    /// Map a library error raised while forward geocoding
    pub fn from_geocode(err: MaplinkError) -> Self {
        match err {
            MaplinkError::MissingInput { .. } => Self::MissingUrl,
            MaplinkError::Geocoding(e) => Self::ForwardGeocoding(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Malformed or non-JSON bodies are reported the same way as a missing URL
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection);
        Self::MissingUrl
    }
}
