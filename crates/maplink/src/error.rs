//! Error types for the maplink library
//!
//! Errors are split by domain: problems with the caller's input, problems
//! following a short link, and problems talking to the geocoding service.

use thiserror::Error;

/// Main error type for the maplink library
#[derive(Error, Debug)]
pub enum MaplinkError {
    /// The caller did not supply a URL or query
    #[error("Missing input: {field}")]
    MissingInput { field: String },

    /// The supplied URL could not be parsed or uses an unsupported scheme
    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Following the redirect chain of a short link failed
    #[error("Failed to unshorten {url}: {reason}")]
    Unshorten { url: String, reason: String },

    /// No latitude/longitude pair could be found in the expanded URL
    #[error("Coordinates not found in URL: {url}")]
    CoordinatesNotFound { url: String },

    /// Geocoding service errors
    #[error("Geocoding error: {0}")]
    Geocoding(#[from] GeocodingError),

    /// Client construction and other setup errors
    #[error("Configuration error: {setting} - {reason}")]
    Config { setting: String, reason: String },
}

/// Errors returned by a geocoding backend
#[derive(Error, Debug)]
pub enum GeocodingError {
    #[error("Request to {service} failed: {reason}")]
    Request { service: String, reason: String },

    #[error("{service} returned error status: {status}")]
    Status { service: String, status: u16 },

    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },
}

/// Shorthand result type for maplink operations
pub type Result<T> = std::result::Result<T, MaplinkError>;

impl MaplinkError {
    pub fn missing_input<S: Into<String>>(field: S) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    pub fn invalid_url<U: Into<String>, R: Into<String>>(url: U, reason: R) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn coordinates_not_found<S: Into<String>>(url: S) -> Self {
        Self::CoordinatesNotFound { url: url.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MaplinkError::missing_input("url").to_string(),
            "Missing input: url"
        );
        assert_eq!(
            MaplinkError::invalid_url("ftp://x", "unsupported scheme").to_string(),
            "Invalid URL: ftp://x - unsupported scheme"
        );

        let upstream = MaplinkError::from(GeocodingError::Status {
            service: "Nominatim".to_string(),
            status: 503,
        });
        assert_eq!(
            upstream.to_string(),
            "Geocoding error: Nominatim returned error status: 503"
        );
    }
}
