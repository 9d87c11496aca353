//! Short link expansion
//!
//! Short links such as `https://maps.app.goo.gl/...` answer with a chain of
//! HTTP redirects ending at the full Google Maps URL. Expansion follows that
//! chain and reports where it ended.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;
use url::{Url, form_urlencoded};

use crate::error::{MaplinkError, Result};

/// Query parameters that only carry click attribution
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "g_st"];

/// Resolves a possibly-shortened URL to its final destination
#[async_trait]
pub trait LinkExpander: Send + Sync {
    async fn expand(&self, url: &str) -> Result<String>;
}

/// [`LinkExpander`] that follows HTTP redirects with reqwest
#[derive(Debug, Clone)]
pub struct HttpLinkExpander {
    client: reqwest::Client,
}

impl HttpLinkExpander {
    pub fn new(user_agent: &str, timeout: Duration, max_redirects: usize) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(max_redirects))
            .build()
            .map_err(|e| MaplinkError::Config {
                setting: "http_client".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl LinkExpander for HttpLinkExpander {
    async fn expand(&self, url: &str) -> Result<String> {
        let parsed = parse_http_url(url)?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| MaplinkError::Unshorten {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let final_url = strip_tracking_params(response.url().clone());
        debug!("Expanded {} -> {} ({})", url, final_url, response.status());

        Ok(final_url.to_string())
    }
}

/// Parse `url`, accepting only http and https
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url.trim()).map_err(|e| MaplinkError::invalid_url(url, e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(MaplinkError::invalid_url(
            url,
            format!("unsupported scheme '{}'", scheme),
        )),
    }
}

fn is_tracking_param(key: &str) -> bool {
    key.starts_with("utm_") || TRACKING_PARAMS.contains(&key)
}

/// Remove click-tracking query parameters, leaving everything else untouched.
///
/// Kept segments are copied raw so their original encoding survives.
pub fn strip_tracking_params(mut url: Url) -> Url {
    let Some(query) = url.query() else {
        return url;
    };

    let segments: Vec<&str> = query.split('&').collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| {
            form_urlencoded::parse(segment.as_bytes())
                .next()
                .is_none_or(|(key, _)| !is_tracking_param(&key))
        })
        .collect();

    if kept.len() == segments.len() {
        return url;
    }

    let kept = kept.join("&");
    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&kept));
    }

    url
}
