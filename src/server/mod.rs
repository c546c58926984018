//! Server module for building HTTP servers with auto-registered routes
//!
//! This module provides a `ServerBuilder` that registers:
//! - A listing route for every registered resource
//! - Health check routes

pub mod builder;
pub mod exposure;
pub mod resource_registry;

pub use builder::ServerBuilder;
pub use resource_registry::{
    API_PREFIX, ListingDescriptor, ResourceDescriptor, ResourceRegistry, ResourceState,
};
