pub mod challenge;
pub mod discovery;
pub mod health;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use prismhook_solver::SolverRegistry;

use crate::config::WebhookConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API group identity, fixed at startup.
    pub webhook: Arc<WebhookConfig>,
    /// Solvers served under the group, keyed by name.
    pub solvers: Arc<SolverRegistry>,
}

impl AppState {
    pub fn new(webhook: WebhookConfig, solvers: SolverRegistry) -> Self {
        Self {
            webhook: Arc::new(webhook),
            solvers: Arc::new(solvers),
        }
    }
}

/// Build the Axum router with health, discovery, and challenge routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Probes
        .route("/healthz", get(health::healthz))
        .route("/livez", get(health::healthz))
        .route("/readyz", get(health::healthz))
        // Aggregated API discovery
        .route("/apis", get(discovery::api_groups))
        .route("/apis/{group}", get(discovery::api_group))
        .route("/apis/{group}/{version}", get(discovery::api_resources))
        // Challenge review
        .route("/apis/{group}/{version}/{solver}", post(challenge::solve))
        .route(
            "/apis/{group}/{version}/namespaces/{namespace}/{solver}",
            post(challenge::solve_namespaced),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
