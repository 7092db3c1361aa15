//! Route assembly: per-resource endpoints plus common health/version routes.

use crate::config::{resolve, ResolvedResource, ResourceConfig};
use crate::error::ConfigError;
use crate::handlers::resource::{default_headers, list};
use crate::state::ResourceState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// One read endpoint, built from a descriptor. Construction is pure and
/// validates once; mounting injects the pool.
pub struct ResourceEndpoint {
    resource: Arc<ResolvedResource>,
}

impl ResourceEndpoint {
    pub fn new(config: ResourceConfig) -> Result<Self, ConfigError> {
        Ok(ResourceEndpoint {
            resource: Arc::new(resolve(config)?),
        })
    }

    pub fn resource(&self) -> &ResolvedResource {
        &self.resource
    }

    /// A one-route router: the GET list handler wrapped by the
    /// default-header middleware.
    pub fn into_router(self, pool: PgPool) -> Router {
        let state = ResourceState {
            pool,
            resource: self.resource,
        };
        Router::new()
            .route("/", get(list))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                default_headers,
            ))
            .with_state(state)
    }
}

/// Mount a set of resources, each under its path, behind a shared CORS
/// layer (the per-resource middleware still sets its own headers when the
/// layer left them unset).
pub fn api_routes(
    pool: PgPool,
    resources: Vec<(String, ResourceConfig)>,
) -> Result<Router, ConfigError> {
    let mut router = Router::new();
    for (path, config) in resources {
        let endpoint = ResourceEndpoint::new(config)?;
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };
        router = router.nest(&path, endpoint.into_router(pool.clone()));
    }
    Ok(router.layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(Duration::from_secs(300)),
    ))
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes (no state): GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
