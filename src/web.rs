use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::ai::{GeminiModel, GenerativeModel};
use crate::api;
use crate::config::WanderLensConfig;
use crate::geolocation::{GeolocationProvider, GoogleGeolocationClient, UnconfiguredGeolocation};
use crate::store::{InMemoryStore, JourneyStore, PhotoStore, PlaceStore, UserStore};

/// Everything a request handler can reach
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub photos: Arc<dyn PhotoStore>,
    pub places: Arc<dyn PlaceStore>,
    pub journeys: Arc<dyn JourneyStore>,
    pub model: Arc<dyn GenerativeModel>,
    pub geolocation: Arc<dyn GeolocationProvider>,
    pub config: Arc<WanderLensConfig>,
}

impl AppState {
    /// One in-memory store behind all four collections
    pub fn in_memory(
        store: InMemoryStore,
        model: Arc<dyn GenerativeModel>,
        geolocation: Arc<dyn GeolocationProvider>,
        config: WanderLensConfig,
    ) -> Self {
        let store = Arc::new(store);
        Self {
            users: store.clone(),
            photos: store.clone(),
            places: store.clone(),
            journeys: store,
            model,
            geolocation,
            config: Arc::new(config),
        }
    }

    /// Seeded store with the hosted model and geolocation clients
    pub fn from_config(config: WanderLensConfig) -> Result<Self> {
        let model = GeminiModel::from_config(&config.model)
            .context("The generative model client could not be created")?;

        let geolocation: Arc<dyn GeolocationProvider> =
            match GoogleGeolocationClient::from_config(&config.maps) {
                Ok(client) => Arc::new(client),
                Err(e) => {
                    warn!("Geolocation disabled: {}", e);
                    Arc::new(UnconfiguredGeolocation)
                }
            };

        Ok(Self::in_memory(
            InMemoryStore::seeded(),
            Arc::new(model),
            geolocation,
            config,
        ))
    }
}

/// The full application: API routes plus cross-cutting layers
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.config.server.body_limit_mb as usize * 1024 * 1024;

    Router::new()
        .nest("/api", api::router())
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("WanderLens API running at http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")
}
