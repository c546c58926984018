//! Typed error handling for listing endpoints
//!
//! Listing is deliberately permissive: out-of-range paging values are clamped
//! and unknown sort fields degrade to an unsorted result, so very little can
//! actually fail. What can fail is grouped here:
//!
//! - [`StorageError`]: the backing collection could not be read
//! - [`RequestError`]: the request itself cannot be served (bad `Host`, ...)
//! - [`ConfigError`]: configuration could not be loaded
//!
//! [`ListingError`] wraps all three and renders as a JSON error response.
//!
//! # Example
//!
//! ```rust,ignore
//! match spec.list(&collection, &raw, &scope, &target).await {
//!     Ok(envelope) => Json(envelope).into_response(),
//!     Err(ListingError::Storage(StorageError::Unavailable { .. })) => retry_later(),
//!     Err(e) => e.into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// The main error type for listing operations
#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    /// The backing collection failed; passed through unmodified
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The request could not be served
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ListingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::Storage(e) => e.status_code(),
            ListingError::Request(e) => e.status_code(),
            ListingError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ListingError::Storage(e) => e.error_code(),
            ListingError::Request(e) => e.error_code(),
            ListingError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a backing collection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The store cannot be reached at all
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    /// A read was attempted and failed
    #[error("Storage {operation} failed: {message}")]
    ReadFailed { operation: String, message: String },
}

impl StorageError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable {
            message: message.into(),
        }
    }

    pub fn read_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        StorageError::ReadFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StorageError::ReadFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
            StorageError::ReadFailed { .. } => "STORAGE_READ_FAILED",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the incoming request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Scheme/host/path do not form an absolute URL
    #[error("Invalid link target: {message}")]
    InvalidLinkTarget { message: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidLinkTarget { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidLinkTarget { .. } => "INVALID_LINK_TARGET",
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid public_url '{url}': {message}")]
    InvalidPublicUrl { url: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::read_failed("count", "connection reset");
        assert!(err.to_string().contains("count"));
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn test_storage_error_status_code() {
        assert_eq!(
            StorageError::unavailable("down").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            StorageError::read_failed("fetch", "boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_listing_error_is_transparent() {
        let inner = StorageError::unavailable("db offline");
        let err: ListingError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_code(), "STORAGE_UNAVAILABLE");
    }

    #[test]
    fn test_request_error_maps_to_400() {
        let err: ListingError = RequestError::InvalidLinkTarget {
            message: "empty host".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_LINK_TARGET");
    }

    #[test]
    fn test_error_response_serialization() {
        let err = ListingError::Storage(StorageError::read_failed("fetch", "timeout"));
        let response = err.to_response();
        assert_eq!(response.code, "STORAGE_READ_FAILED");

        let json = serde_json::to_value(&response).expect("serialize should succeed");
        assert_eq!(json["code"], "STORAGE_READ_FAILED");
        assert!(json["message"].as_str().unwrap().contains("timeout"));
    }

    #[test]
    fn test_config_error_parse() {
        let parse_err = serde_yaml::from_str::<Vec<u32>>("not: [a list").unwrap_err();
        let err: ListingError = ConfigError::from(parse_err).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }
}
