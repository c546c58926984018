//! # listkit
//!
//! A generic collection-listing engine for read-only REST endpoints.
//!
//! A single request goes through the same pipeline for every resource:
//!
//! - **Normalize**: page/pageSize or skip/limit, clamped to `[1, 100]`
//! - **Filter**: resource scope filters AND a substring search over the
//!   resource's searchable attributes
//! - **Sort**: a case-insensitive allow-list of attributes, with a fixed
//!   tie-break for deterministic paging
//! - **Execute**: count, then fetch one window, against a backing collection
//! - **Envelope**: `{ items, total, page, pageSize, hasNext, nextLink }`
//!
//! Unknown sort fields, out-of-range paging and blank searches never fail a
//! request; only the backing collection can.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listkit::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_config(ListingConfig::from_yaml_file("listkit.yaml")?)
//!         .register::<Organization>(InMemoryCollection::new())
//!         .register::<Venue>(InMemoryCollection::new())
//!         .serve()
//!         .await
//! }
//! ```
//!
//! Then `GET /api/v1/venues?q=Hall&sortBy=name&page=2`.

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        filter::{ScopeFilter, TextField, Unscoped},
        resource::{Listable, ListingSpec},
        store::{Collection, Window},
    };

    // === Pipeline Types ===
    pub use crate::core::{
        envelope::PageEnvelope,
        link::LinkTarget,
        query::{Addressing, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, NormalizedQuery, RawQuery},
        sort::{
            SortDirection, SortField, SortOrder, cmp_natural, cmp_option, cmp_option_f64,
            cmp_option_natural,
        },
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ErrorResponse, ListingError, RequestError, StorageError,
    };

    // === Resources ===
    pub use crate::entities::{
        Asset, AssetScope, Event, EventScope, Organization, Venue, VenueScope,
    };

    // === Storage ===
    pub use crate::storage::InMemoryCollection;

    // === Configuration ===
    pub use crate::config::{ListingConfig, ResourceConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, exposure::RestExposure};

    // === Re-exports from external crates ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use axum::Router;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
