//! maplink HTTP API Server
//!
//! Resolves Google Maps short links to coordinates and addresses, and
//! forward geocodes free-text addresses through Nominatim.

use axum::{
    Router,
    extract::State,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    response::Json,
    routing::get,
};
use maplink::{HttpLinkExpander, LinkResolver, NominatimClient};
use serde_json::{Value, json};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

mod config;
mod error;
mod models;
mod routes;

use config::ServerConfig;
use error::{ApiError, Result};
use models::{EndpointInfo, LandingPage};

/// Main application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<LinkResolver>,
    pub config: ServerConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            "maplink_server=debug,maplink=debug,tower_http=debug".to_string()
        }))
        .init();

    // Load configuration
    let config = ServerConfig::from_env()?;
    info!("Starting maplink server on {}:{}", config.host, config.port);

    let expander = HttpLinkExpander::new(
        &config.user_agent,
        config.request_timeout(),
        config.max_redirects,
    )
    .map_err(|e| ApiError::Config(e.to_string()))?;
    let geocoder =
        NominatimClient::new(config.nominatim()).map_err(|e| ApiError::Config(e.to_string()))?;
    info!("Using Nominatim at {}", config.nominatim_url);

    let state = AppState {
        resolver: Arc::new(LinkResolver::new(Arc::new(expander), Arc::new(geocoder))),
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = bind_listener(&config).await?;
    let addr = listener.local_addr()?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Bind the configured host, which may be an IP literal or a hostname
async fn bind_listener(config: &ServerConfig) -> Result<tokio::net::TcpListener> {
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    Ok(listener)
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let router = Router::new()
        .route("/", get(landing_page))
        .route("/health", get(health_check))
        .merge(routes::resolve::router())
        .merge(routes::geocode::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    match cors {
        Some(cors) => router.layer(cors),
        None => router,
    }
}

/// Build the CORS layer for the configured origins
fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    if origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::permissive());
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([CONTENT_TYPE]),
    )
}

/// Landing page
async fn landing_page(State(state): State<AppState>) -> Json<LandingPage> {
    Json(LandingPage {
        service: "maplink".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        message: state.config.landing_message.clone(),
        endpoints: vec![
            EndpointInfo {
                method: "POST",
                path: "/resolve",
                description: "Resolve a Google Maps short link to coordinates and address",
            },
            EndpointInfo {
                method: "GET",
                path: "/geocode",
                description: "Look up coordinates for the address in the url parameter",
            },
        ],
    })
}

/// Health check endpoint
async fn health_check() -> Result<Json<Value>> {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "status": "healthy",
        "service": "maplink-server",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": timestamp
    })))
}
