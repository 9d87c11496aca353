//! maplink resolves Google Maps short links to coordinates and looks up the
//! address at those coordinates with Nominatim.

pub mod coordinates;
pub mod error;
pub mod geocoder;
pub mod nominatim;
pub mod resolver;
pub mod unshorten;

// Re-export core types
pub use coordinates::{Coordinates, extract_coordinates};
pub use error::{GeocodingError, MaplinkError, Result};
pub use geocoder::{GeocodedPlace, Geocoder, ReverseGeocode};
pub use nominatim::{NominatimClient, NominatimConfig};
pub use resolver::{ADDRESS_NOT_FOUND, LinkResolver, ResolvedLink};
pub use unshorten::{HttpLinkExpander, LinkExpander};

/// Get the library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
