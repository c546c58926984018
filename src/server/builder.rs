//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::resource_registry::{ListingDescriptor, ResourceRegistry};
use crate::config::ListingConfig;
use crate::core::resource::Listable;
use crate::core::store::Collection;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered listing routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ListingConfig::from_yaml_file("listkit.yaml")?)
///     .register::<Venue>(InMemoryCollection::from_records(venues))
///     .register::<Event>(InMemoryCollection::from_records(events))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ListingConfig,
    registry: ResourceRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ListingConfig::default_config(),
            registry: ResourceRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration
    ///
    /// Per-resource overrides are applied when the router is built, so the
    /// order relative to `register` does not matter.
    pub fn with_config(mut self, config: ListingConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Expose `R` backed by `collection`
    pub fn register<R: Listable>(self, collection: impl Collection<R> + 'static) -> Self {
        self.register_shared::<R>(Arc::new(collection))
    }

    /// Expose `R` backed by a collection shared with other code
    pub fn register_shared<R: Listable>(mut self, collection: Arc<dyn Collection<R>>) -> Self {
        self.registry
            .register(Box::new(ListingDescriptor::<R>::new(collection)));
        self
    }

    /// Configuration the server will be built with
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Names of the registered resources
    pub fn resource_names(&self) -> Vec<&str> {
        self.registry.resource_names()
    }

    /// Build the final REST router
    ///
    /// Fails only when the configured `public_url` is not a usable base URL.
    pub fn build(self) -> Result<Router> {
        RestExposure::build_router(&self.registry, &self.config, self.custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the configuration and handles
    /// SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::entities::{Asset, Event, Organization, Venue};
    use crate::storage::InMemoryCollection;

    #[test]
    fn test_new_builder_has_no_resources() {
        let builder = ServerBuilder::new();
        assert!(builder.resource_names().is_empty());
        assert_eq!(builder.config().server.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_register_all_resources() {
        let builder = ServerBuilder::new()
            .register::<Asset>(InMemoryCollection::new())
            .register::<Event>(InMemoryCollection::new())
            .register::<Organization>(InMemoryCollection::new())
            .register::<Venue>(InMemoryCollection::new());

        assert_eq!(
            builder.resource_names(),
            vec!["assets", "events", "organizations", "venues"]
        );
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_build_rejects_bad_public_url() {
        let config = ListingConfig {
            server: ServerConfig {
                public_url: Some("::not a url".to_string()),
                ..ServerConfig::default()
            },
            resources: Vec::new(),
        };

        let result = ServerBuilder::new()
            .with_config(config)
            .register::<Venue>(InMemoryCollection::new())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_routes_merge() {
        let extra = Router::new().route("/ping", axum::routing::get(|| async { "pong" }));
        let result = ServerBuilder::new().with_custom_routes(extra).build();
        assert!(result.is_ok());
    }
}
