//! Latitude/longitude extraction from Google Maps URLs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MaplinkError, Result};

/// Map viewport center, e.g. `.../@40.7128,-74.0060,15z`
static VIEWPORT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@(-?\d+\.\d+),(-?\d+\.\d+)").expect("valid viewport regex"));

/// Place data block, e.g. `.../data=!3m1!4b1!4m6!3m5!8m2!3d40.7128!4d-74.0060`
static PLACE_DATA_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)").expect("valid place data regex"));

/// Query parameters, e.g. `?q=40.7128,-74.0060` or `&ll=40.7128%2C-74.0060`
static QUERY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[?&](?:q|ll|query|center)=(-?\d+\.\d+)(?:,|%2[Cc])(-?\d+\.\d+)")
        .expect("valid query regex")
});

/// A coordinate pair as it appeared in a URL.
///
/// The values are kept as the decimal strings that were matched so they can
/// be echoed back and forwarded to the geocoder without any reformatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    pub fn new<S: Into<String>>(latitude: S, longitude: S) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }

    pub fn lat(&self) -> Option<f64> {
        self.latitude.parse().ok()
    }

    pub fn lon(&self) -> Option<f64> {
        self.longitude.parse().ok()
    }

    fn is_in_range(&self) -> bool {
        match (self.lat(), self.lon()) {
            (Some(lat), Some(lon)) => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon),
            _ => false,
        }
    }
}

/// Extract the first latitude/longitude pair found in `url`.
///
/// The `@lat,lon` viewport form is tried first; the place data block and
/// coordinate query parameters are fallbacks for links that carry no viewport.
pub fn extract_coordinates(url: &str) -> Result<Coordinates> {
    [&*VIEWPORT_PATTERN, &*PLACE_DATA_PATTERN, &*QUERY_PATTERN]
        .into_iter()
        .filter_map(|pattern| pattern.captures(url))
        .map(|caps| Coordinates::new(&caps[1], &caps[2]))
        .find(Coordinates::is_in_range)
        .ok_or_else(|| MaplinkError::coordinates_not_found(url))
}
