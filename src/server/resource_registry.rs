//! Resource registry for managing resource descriptors and auto-generating listing routes

use axum::{Router, routing::get};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

use crate::config::ListingConfig;
use crate::core::resource::{Listable, ListingSpec};
use crate::core::store::Collection;
use crate::server::exposure::rest::list_resource;

/// Prefix shared by every listing route
pub const API_PREFIX: &str = "/api/v1";

/// Trait that describes how to build routes for a resource
///
/// Each resource (Asset, Event, Venue, etc.) gets one descriptor, which knows
/// its backing collection and produces its listing route.
pub trait ResourceDescriptor: Send + Sync {
    /// Plural name used in URLs (e.g., "venues")
    fn resource_name(&self) -> &str;

    /// Build the listing route for this resource
    ///
    /// Should return a Router with `GET /api/v1/{plural}`.
    fn build_routes(&self, config: &ListingConfig, public_url: Option<&Url>) -> Router;
}

/// Shared state of one listing route
pub struct ResourceState<R: Send + Sync + 'static> {
    pub collection: Arc<dyn Collection<R>>,
    pub spec: ListingSpec<R>,

    /// Overrides the request's scheme/host in continuation links
    pub public_url: Option<Url>,
}

/// Descriptor for any [`Listable`] record type
pub struct ListingDescriptor<R: Listable> {
    collection: Arc<dyn Collection<R>>,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Listable> ListingDescriptor<R> {
    pub fn new(collection: Arc<dyn Collection<R>>) -> Self {
        Self {
            collection,
            _marker: PhantomData,
        }
    }
}

impl<R: Listable> ResourceDescriptor for ListingDescriptor<R> {
    fn resource_name(&self) -> &str {
        R::resource_name()
    }

    fn build_routes(&self, config: &ListingConfig, public_url: Option<&Url>) -> Router {
        let spec = R::listing_spec().with_config(config.resource(R::resource_name()));
        let state = Arc::new(ResourceState {
            collection: self.collection.clone(),
            spec,
            public_url: public_url.cloned(),
        });

        Router::new()
            .route(
                &format!("{}/{}", API_PREFIX, R::resource_name()),
                get(list_resource::<R>),
            )
            .with_state(state)
    }
}

/// Registry for all resources in the application
#[derive(Default)]
pub struct ResourceRegistry {
    descriptors: HashMap<String, Box<dyn ResourceDescriptor>>,
}

impl ResourceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register a resource descriptor
    ///
    /// Registering the same resource name twice replaces the first descriptor.
    pub fn register(&mut self, descriptor: Box<dyn ResourceDescriptor>) {
        let name = descriptor.resource_name().to_string();
        if self.descriptors.contains_key(&name) {
            tracing::warn!(resource = %name, "Resource registered twice, replacing");
        }
        self.descriptors.insert(name, descriptor);
    }

    /// Build a router with all registered listing routes
    pub fn build_routes(&self, config: &ListingConfig, public_url: Option<&Url>) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(config, public_url));
        }

        router
    }

    /// Get all registered resource names, sorted
    pub fn resource_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.descriptors.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
