use maplink::GeocodedPlace;
use serde::Serialize;
use url::form_urlencoded;

/// Query string of `GET /geocode`.
///
/// The parameter is called `url` for compatibility with existing clients even
/// though it carries free-text address.
#[derive(Debug, Default)]
pub struct GeocodeQuery {
    pub url: Option<String>,
}

impl GeocodeQuery {
    /// Parse a raw query string, taking the first `url` value when repeated
    pub fn parse(raw: Option<&str>) -> Self {
        let url = raw.and_then(|raw| {
            form_urlencoded::parse(raw.as_bytes())
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
        });

        Self { url }
    }
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub lat: String,
    pub lon: String,
}

impl From<GeocodedPlace> for GeocodeResponse {
    fn from(place: GeocodedPlace) -> Self {
        Self {
            lat: place.lat,
            lon: place.lon,
        }
    }
}
