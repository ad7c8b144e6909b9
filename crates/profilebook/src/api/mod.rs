//! HTTP API for profilebook.
//!
//! Routes:
//!
//! - `GET    /api/profiles`      list every profile
//! - `POST   /api/profiles`      create a profile (201)
//! - `GET    /api/profiles/{id}` fetch one profile
//! - `PATCH  /api/profiles/{id}` merge a partial update
//! - `DELETE /api/profiles/{id}` remove a profile (204)
//! - `GET    /health`            store statistics
//!
//! Unknown ids answer 404 with `{"message": "Profile not found"}`; invalid
//! payloads answer 400 with the full list of violated fields.

mod handlers;
mod response;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use chrono::{DateTime, Utc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{ApiConfig, Config};
use crate::error::{Error, Result};
use crate::store::SharedStore;

pub use handlers::HealthReport;
pub use response::{ErrorBody, NOT_FOUND_MESSAGE};

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The profile store, locked per operation.
    pub store: SharedStore,
    /// Request body limit in bytes, reported in 413 responses.
    pub body_limit: usize,
    /// When this state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create handler state around a store.
    #[must_use]
    pub fn new(store: SharedStore, api: &ApiConfig) -> Self {
        Self {
            store,
            body_limit: api.max_body_bytes,
            started_at: Utc::now(),
        }
    }
}

/// Build the API router.
#[must_use]
pub fn router(state: AppState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route(
            "/api/profiles",
            get(handlers::list_profiles).post(handlers::create_profile),
        )
        .route(
            "/api/profiles/{id}",
            get(handlers::get_profile)
                .patch(handlers::update_profile)
                .delete(handlers::delete_profile),
        )
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Serve the API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(config: &Config, store: SharedStore) -> Result<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind { addr, source })?;

    info!(addr = %listener.local_addr()?, "Profile API listening");

    let app = router(AppState::new(store, &config.api));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Profile API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C, running until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
