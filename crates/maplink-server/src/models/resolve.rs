use serde::Deserialize;

/// Body of `POST /resolve`
#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub url: Option<String>,
}
