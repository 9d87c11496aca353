use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use maplink::ResolvedLink;
use tracing::debug;

use crate::{
    AppState,
    error::{ApiError, Result},
    models::ResolveRequest,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/resolve", post(resolve_map_link))
}

/// Resolve a Google Maps short link to its coordinates and address
#[axum::debug_handler]
pub async fn resolve_map_link(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Json<ResolvedLink>> {
    let Json(request) = payload?;

    let short_url = request
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;
    debug!("Resolving map link: {}", short_url);

    let resolved = state
        .resolver
        .resolve(&short_url)
        .await
        .map_err(ApiError::from_resolve)?;

    Ok(Json(resolved))
}
