use serde::Serialize;

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub service: String,
    pub version: String,
    pub message: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Debug, Serialize)]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}
