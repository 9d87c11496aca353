//! Geocoding backend abstraction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{coordinates::Coordinates, error::Result};

/// Result of a reverse lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeocode {
    /// Human readable address; absent when the service knows nothing at that point
    pub display_name: Option<String>,
}

/// Best match of a forward lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub lat: String,
    pub lon: String,
    pub display_name: Option<String>,
}

/// A service that converts between coordinates and addresses
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up the address at `coords`
    async fn reverse(&self, coords: &Coordinates) -> Result<ReverseGeocode>;

    /// Look up the best matching place for a free-text `query`.
    ///
    /// Returns `Ok(None)` when the service has no match.
    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>>;
}
