//! Request handlers for the profile API.
//!
//! Every handler holds the store lock for exactly one store call, so each
//! request is applied atomically.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::AppState;
use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::validation::{validate_create, validate_update};

/// Response of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// Always `"ok"` when the server answers.
    pub status: &'static str,
    /// Number of stored profiles.
    pub profiles: usize,
    /// Number of profiles marked as favorite.
    pub favorites: usize,
    /// The id the next created profile will receive.
    pub next_id: u64,
    /// When the server started.
    pub started_at: DateTime<Utc>,
}

pub(crate) async fn list_profiles(State(state): State<AppState>) -> Json<Vec<Profile>> {
    let profiles = state.store.read().await.list();
    debug!(count = profiles.len(), "Listed profiles");
    Json(profiles)
}

pub(crate) async fn get_profile(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Profile>> {
    let id = path_id(path)?;
    state
        .store
        .read()
        .await
        .get(id)
        .map(Json)
        .ok_or_else(|| Error::not_found(id))
}

pub(crate) async fn create_profile(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>)> {
    let Json(input) = payload.map_err(|r| Error::from_json_rejection(&r, state.body_limit))?;
    let fields = validate_create(&input)?;

    let profile = state.store.write().await.create(fields);
    Ok((StatusCode::CREATED, Json(profile)))
}

pub(crate) async fn update_profile(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Profile>> {
    // Body errors take precedence over unknown ids.
    let Json(input) = payload.map_err(|r| Error::from_json_rejection(&r, state.body_limit))?;
    let patch = validate_update(&input)?;
    let id = path_id(path)?;

    let profile = state.store.write().await.update(id, patch)?;
    Ok(Json(profile))
}

pub(crate) async fn delete_profile(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<StatusCode> {
    let id = path_id(path)?;
    state.store.write().await.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let stats = state.store.read().await.stats();
    Json(HealthReport {
        status: "ok",
        profiles: stats.total_profiles,
        favorites: stats.favorite_profiles,
        next_id: stats.next_id,
        started_at: state.started_at,
    })
}

fn path_id(path: std::result::Result<Path<String>, PathRejection>) -> Result<u64> {
    let Path(raw) = path.map_err(|r| Error::from_path_rejection(&r))?;
    parse_id(&raw)
}

/// Parse a profile id from a path segment.
///
/// Integral numeric spellings such as `1.0` or `1e0` name the same profile
/// as `1`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn parse_id(raw: &str) -> Result<u64> {
    let trimmed = raw.trim();
    if let Ok(id) = trimmed.parse::<u64>() {
        return Ok(id);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 => {
            Ok(n as u64)
        }
        _ => Err(Error::InvalidId(raw.to_owned())),
    }
}
