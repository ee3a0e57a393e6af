//! StuntPitch API Server
//!
//! HTTP surface and infrastructure adapters around the embedding coordinator.
//!
//! - `adapters/`: Postgres (pgvector) profile store, OpenAI embedding provider
//! - `routes/`: axum handlers and OpenAPI documentation
//! - `auth`: optional bearer-key guard

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use stuntpitch::EmbeddingCoordinator;

pub mod adapters;
pub mod auth;
pub mod error;
pub mod models;
pub mod routes;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<EmbeddingCoordinator>,
    /// Bearer key required on protected routes; `None` disables the check
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(coordinator: Arc<EmbeddingCoordinator>, api_key: Option<String>) -> Self {
        Self {
            coordinator,
            api_key: api_key.filter(|k| !k.is_empty()).map(Arc::from),
        }
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "StuntPitch API is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the full router with shared state
pub fn app(state: AppState) -> Router {
    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::embeddings::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
