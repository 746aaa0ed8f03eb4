//! Request handlers

use super::error::ApiError;
use super::AppState;
use crate::species::{parse_dna, resolve};
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use log::{debug, info};
use serde_json::{json, Value};

/// `GET /metadata/:tokenId`
pub async fn metadata(
    State(state): State<AppState>,
    token_id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(token_id) = token_id?;
    let dna = parse_dna(&token_id)?;
    let snapshot = state.registry.snapshot();
    let metadata = resolve(dna, &snapshot.species);
    debug!("Resolved token {} against {}", dna, &snapshot.fingerprint[..16]);
    Ok(Json(json!({ "metadata": metadata })))
}

/// `GET /traits`
pub async fn traits(State(state): State<AppState>) -> Json<Value> {
    let snapshot = state.registry.snapshot();
    Json(json!({
        "fingerprint": snapshot.fingerprint,
        "dna_space": snapshot.species.dna_space().to_string(),
        "loaded_at": snapshot.loaded_at,
        "traits": snapshot.species,
    }))
}

/// `POST /reload`
pub async fn reload(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let snapshot = state.registry.reload()?;
    info!(
        "Reloaded {} traits, fingerprint {}",
        snapshot.species.len(),
        &snapshot.fingerprint[..16]
    );
    Ok(Json(json!({
        "fingerprint": snapshot.fingerprint,
        "traits": snapshot.species.len(),
        "loaded_at": snapshot.loaded_at,
    })))
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "traits": state.registry.snapshot().species.len(),
    }))
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("{} not allowed on {}", method, uri.path()),
    )
}
