//! Nominatim (OpenStreetMap) geocoding client

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, warn};

use crate::{
    coordinates::Coordinates,
    error::{GeocodingError, MaplinkError, Result},
    geocoder::{GeocodedPlace, Geocoder, ReverseGeocode},
};

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("maplink/", env!("CARGO_PKG_VERSION"));

const SERVICE: &str = "Nominatim";

/// Nominatim client settings
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    /// Base URL without the endpoint path
    pub base_url: String,

    /// Sent with every request; Nominatim rejects anonymous clients
    pub user_agent: String,

    pub timeout: Duration,

    /// Minimum spacing between two requests, zero disables throttling
    pub min_request_interval: Duration,

    /// Preferred result language (`accept-language` parameter)
    pub accept_language: Option<String>,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMINATIM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            // Usage policy: at most one request per second
            min_request_interval: Duration::from_secs(1),
            accept_language: None,
        }
    }
}

/// [`Geocoder`] backed by the Nominatim REST API
#[derive(Debug)]
pub struct NominatimClient {
    client: reqwest::Client,
    config: NominatimConfig,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| MaplinkError::Config {
                setting: "nominatim_client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            config,
            last_request: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &NominatimConfig {
        &self.config
    }

    /// Wait until the configured interval has passed since the previous request.
    ///
    /// The lock is held across the sleep so concurrent callers queue up.
    async fn throttle(&self) {
        if self.config.min_request_interval.is_zero() {
            return;
        }

        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.config.min_request_interval {
                tokio::time::sleep(self.config.min_request_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, &str)> = params.to_vec();
        if let Some(language) = self.config.accept_language.as_deref() {
            params.push(("accept-language", language));
        }

        self.throttle().await;

        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );
        debug!("Nominatim request: {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| GeocodingError::Request {
                service: SERVICE.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Nominatim {} returned status {}", endpoint, status);
            return Err(GeocodingError::Status {
                service: SERVICE.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        let body = response.json::<T>().await.map_err(|e| {
            GeocodingError::InvalidResponse {
                service: SERVICE.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(body)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, coords: &Coordinates) -> Result<ReverseGeocode> {
        self.get_json(
            "reverse",
            &[
                ("lat", coords.latitude.as_str()),
                ("lon", coords.longitude.as_str()),
                ("format", "json"),
            ],
        )
        .await
    }

    async fn search(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        let results: Vec<GeocodedPlace> = self
            .get_json(
                "search",
                &[("q", query), ("format", "json"), ("limit", "1")],
            )
            .await?;

        Ok(results.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_response() {
        // Sample response from Nominatim
        let json = r#"[{"place_id":1,"lat":"37.7790262","lon":"-122.4199061","display_name":"San Francisco, California, USA"}]"#;
        let results: Vec<GeocodedPlace> = serde_json::from_str(json).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].lat, "37.7790262");
        assert_eq!(results[0].lon, "-122.4199061");
    }

    #[test]
    fn test_parse_reverse_error_body() {
        let reverse: ReverseGeocode = serde_json::from_str(r#"{"error":"Unable to geocode"}"#).unwrap();
        assert_eq!(reverse.display_name, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_spaces_requests() {
        let client = NominatimClient::new(NominatimConfig {
            min_request_interval: Duration::from_millis(1000),
            ..NominatimConfig::default()
        })
        .unwrap();

        let start = Instant::now();
        client.throttle().await;
        client.throttle().await;
        client.throttle().await;

        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_disables_throttle() {
        let client = NominatimClient::new(NominatimConfig {
            min_request_interval: Duration::ZERO,
            ..NominatimConfig::default()
        })
        .unwrap();

        let start = Instant::now();
        client.throttle().await;
        client.throttle().await;

        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
