//! REST API exposure
//!
//! Consumes a [`ResourceRegistry`] and produces an Axum `Router` with one
//! listing route per resource plus health checks.

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ListingConfig;
use crate::core::envelope::PageEnvelope;
use crate::core::error::ListingError;
use crate::core::link::LinkTarget;
use crate::core::query::RawQuery;
use crate::core::resource::Listable;
use crate::server::resource_registry::{ResourceRegistry, ResourceState};

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a registry
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - One `GET /api/v1/{plural}` route per registered resource
    /// - Custom routes
    ///
    /// wrapped in a request tracing layer.
    pub fn build_router(
        registry: &ResourceRegistry,
        config: &ListingConfig,
        custom_routes: Vec<Router>,
    ) -> Result<Router> {
        let public_url = config.server.public_url()?;

        let mut app =
            Self::health_routes().merge(registry.build_routes(config, public_url.as_ref()));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "listkit"
        }))
    }
}

/// `GET /api/v1/{plural}`
///
/// Paging, search and sort parameters and the resource's scope filters are
/// read from the same query string.
pub async fn list_resource<R: Listable>(
    State(state): State<Arc<ResourceState<R>>>,
    target: LinkTarget,
    Query(raw): Query<RawQuery>,
    Query(scope): Query<R::Scope>,
) -> Result<Json<PageEnvelope<R>>, ListingError> {
    let target = match &state.public_url {
        Some(public) => target.rebase(public),
        None => target,
    };

    let envelope = state
        .spec
        .list(state.collection.as_ref(), &raw, &scope, &target)
        .await?;

    Ok(Json(envelope))
}
