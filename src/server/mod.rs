//! Metadata HTTP server
//!
//! A thin axum layer over the resolver: parse the token id, take the current
//! trait snapshot, resolve, render JSON. All failures use one error envelope.

mod error;
mod routes;

pub use error::ApiError;

use crate::config::{ConfigError, ServerConfig};
use crate::species::{SpecieMetadata, SpeciesError, TraitRegistry};
use axum::routing::{get, post};
use axum::Router;
use log::info;
use std::future::Future;
use std::sync::Arc;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TraitRegistry>,
}

impl AppState {
    pub fn new(registry: TraitRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Registry from the configured trait file, or the built-in collection
    pub fn from_config(config: &ServerConfig) -> Result<Self, SpeciesError> {
        let registry = match &config.traits_path {
            Some(path) => TraitRegistry::from_path(path)?,
            None => {
                info!("No trait file configured, using the built-in collection");
                TraitRegistry::new(SpecieMetadata::default_collection())
            }
        };
        Ok(Self::new(registry))
    }
}

/// Server start-up errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Species(#[from] SpeciesError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/metadata/:token_id",
            get(routes::metadata).fallback(routes::method_not_allowed),
        )
        .route("/traits", get(routes::traits).fallback(routes::method_not_allowed))
        .route("/reload", post(routes::reload).fallback(routes::method_not_allowed))
        .route("/health", get(routes::health).fallback(routes::method_not_allowed))
        .fallback(routes::not_found)
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves
pub async fn serve(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ServerError> {
    let addr = config.bind_addr()?;
    let state = AppState::from_config(config)?;
    info!("{}", state.registry.snapshot().species.summary());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Metadata server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("Metadata server stopped");
    Ok(())
}
