//! Short link -> coordinates -> address pipeline

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    coordinates::extract_coordinates,
    error::{MaplinkError, Result},
    geocoder::{GeocodedPlace, Geocoder},
    unshorten::LinkExpander,
};

/// Address reported when the geocoder has nothing at the resolved point
pub const ADDRESS_NOT_FOUND: &str = "Address not found";

/// Everything learned about a map link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub short_url: String,
    pub long_url: String,
    pub latitude: String,
    pub longitude: String,
    pub address: String,
}

/// Ties a [`LinkExpander`] and a [`Geocoder`] together
#[derive(Clone)]
pub struct LinkResolver {
    expander: Arc<dyn LinkExpander>,
    geocoder: Arc<dyn Geocoder>,
}

impl LinkResolver {
    pub fn new(expander: Arc<dyn LinkExpander>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { expander, geocoder }
    }

    /// Expand `short_url`, pull the coordinates out of the result and look up
    /// the address there.
    pub async fn resolve(&self, short_url: &str) -> Result<ResolvedLink> {
        let short_url = short_url.trim();
        if short_url.is_empty() {
            return Err(MaplinkError::missing_input("url"));
        }

        let long_url = self.expander.expand(short_url).await?;
        let coords = extract_coordinates(&long_url)?;
        debug!(
            "Found coordinates {},{} in {}",
            coords.latitude, coords.longitude, long_url
        );

        let reverse = self.geocoder.reverse(&coords).await?;
        let address = reverse
            .display_name
            .unwrap_or_else(|| ADDRESS_NOT_FOUND.to_string());

        info!("Resolved {} -> {}", short_url, address);

        Ok(ResolvedLink {
            short_url: short_url.to_string(),
            long_url,
            latitude: coords.latitude,
            longitude: coords.longitude,
            address,
        })
    }

    /// Forward geocode a free-text address
    pub async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(MaplinkError::missing_input("url"));
        }

        self.geocoder.search(query).await
    }
}
