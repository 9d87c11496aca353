use axum::{
    Json, Router,
    extract::{RawQuery, State},
    routing::get,
};
use tracing::debug;

use crate::{
    AppState,
    error::{ApiError, Result},
    models::{GeocodeQuery, GeocodeResponse},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/geocode", get(geocode))
}

/// Forward geocode a free-text address
#[axum::debug_handler]
pub async fn geocode(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<GeocodeResponse>> {
    let address = GeocodeQuery::parse(raw.as_deref())
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;
    debug!("Geocoding address: {}", address);

    let place = state
        .resolver
        .geocode(&address)
        .await
        .map_err(ApiError::from_geocode)?
        .ok_or(ApiError::AddressNotFound)?;

    Ok(Json(place.into()))
}
