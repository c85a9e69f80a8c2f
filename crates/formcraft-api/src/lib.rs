//! FormCraft API backend
//!
//! Axum router over the repository and session ports. State is three
//! trait-object handles; the binary wires in the in-memory store and the
//! signed-token verifier.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use formcraft_store::{FormRepository, MemoryStore, SubmissionRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;

use session::{SessionVerifier, TokenVerifier};

#[derive(Clone)]
pub struct AppState {
    pub forms: Arc<dyn FormRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub sessions: Arc<dyn SessionVerifier>,
}

impl AppState {
    /// In-memory store plus signed-token sessions, for the binary and tests.
    pub fn in_memory(session_secret: &str) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            forms: store.clone(),
            submissions: store,
            sessions: Arc::new(TokenVerifier::new(session_secret)),
        }
    }
}

/// Build the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", routes::auth::router())
        .nest("/api/forms", routes::forms::router())
        .nest("/api/share", routes::share::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_session,
        ))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
