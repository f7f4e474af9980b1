//! # scrutineer-server
//!
//! HTTP front end for the validation engine.
//!
//! Two routes:
//! - `GET /health`: liveness probe
//! - `POST /validate`: one candidate batch in, one validation summary out
//!
//! The router is exposed as [`app`] so tests and embedders can drive it
//! without binding a socket.
//!
//! ## Example
//!
//! ```rust,ignore
//! use scrutineer_core::Orchestrator;
//! use scrutineer_server::{app, AppState};
//!
//! let state = AppState::new(Orchestrator::with_defaults());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app(state)).await?;
//! ```

pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use scrutineer_core::Orchestrator;

pub use error::{ErrorResponse, ServerError};
pub use handlers::HealthResponse;

/// Shared state behind every handler.
///
/// Cloning is cheap; clones share one orchestrator.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    pub(crate) fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/validate", post(handlers::validate))
        .with_state(state)
}
