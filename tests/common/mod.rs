//! Shared fixtures for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{Duration, TimeZone, Utc};
use listkit::core::filter::RecordFilter;
use listkit::core::sort::SortOrder;
use listkit::core::store::{Collection, Window};
use listkit::prelude::*;
use url::Url;

/// `n` venues named "Venue 01".."Venue nn", ids 1..=n, spread over three
/// organizations, inserted in reverse name order
pub fn venues(n: i64) -> Vec<Venue> {
    (1..=n)
        .rev()
        .map(|i| Venue {
            id: i,
            organization_id: (i % 3) + 1,
            name: format!("Venue {:02}", i),
            address: Some(format!("{} Market Street", i)),
            latitude: Some(49.0 + i as f64 / 100.0),
            longitude: None,
        })
        .collect()
}

pub fn organizations() -> Vec<Organization> {
    vec![
        Organization {
            id: 1,
            name: "Riverside Arts".to_string(),
            description: Some("Community theatre collective".to_string()),
        },
        Organization {
            id: 2,
            name: "Harbor Labs".to_string(),
            description: None,
        },
        Organization {
            id: 3,
            name: "City Library".to_string(),
            description: Some("Public lectures and readings".to_string()),
        },
    ]
}

/// `n` organizations named "R1".."Rn" with no zero padding, inserted in
/// reverse order
pub fn plain_named_organizations(n: i64) -> Vec<Organization> {
    (1..=n)
        .rev()
        .map(|i| Organization {
            id: i,
            name: format!("R{}", i),
            description: None,
        })
        .collect()
}

/// One event per day of June 2025, `n` of them, alternating between venues 1 and 2
pub fn events(n: i64) -> Vec<Event> {
    (1..=n)
        .map(|i| {
            let starts_at = Utc
                .with_ymd_and_hms(2025, 6, i as u32, 19, 0, 0)
                .unwrap();
            Event {
                id: i,
                venue_id: if i % 2 == 0 { 2 } else { 1 },
                title: format!("Evening {}", i),
                description: (i % 5 == 0).then(|| "Jazz night".to_string()),
                starts_at,
                ends_at: starts_at + Duration::hours(3),
                capacity: Some((i * 10) as i32),
                image_url: None,
            }
        })
        .collect()
}

pub fn assets() -> Vec<Asset> {
    (1..=6)
        .map(|i| Asset {
            id: i,
            event_id: if i <= 4 { 1 } else { 2 },
            file_path: format!("/uploads/{:04}.bin", i),
            original_file_name: Some(if i % 2 == 0 {
                format!("poster-{}.png", i)
            } else {
                format!("program-{}.pdf", i)
            }),
            content_type: Some(if i % 2 == 0 {
                "image/png".to_string()
            } else {
                "application/pdf".to_string()
            }),
            uploaded_at: Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(i),
        })
        .collect()
}

/// Router exposing all four resources over seeded in-memory collections
pub fn collab_router(config: ListingConfig) -> Router {
    ServerBuilder::new()
        .with_config(config)
        .register::<Asset>(InMemoryCollection::from_records(assets()))
        .register::<Event>(InMemoryCollection::from_records(events(20)))
        .register::<Organization>(InMemoryCollection::from_records(organizations()))
        .register::<Venue>(InMemoryCollection::from_records(venues(25)))
        .build()
        .unwrap()
}

pub fn collab_server() -> TestServer {
    TestServer::new(collab_router(ListingConfig::default_config()))
}

/// A collection whose every read fails with `error`
pub struct FailingCollection {
    pub error: StorageError,
}

impl FailingCollection {
    pub fn unavailable() -> Self {
        Self {
            error: StorageError::unavailable("connection refused"),
        }
    }

    pub fn read_failed() -> Self {
        Self {
            error: StorageError::read_failed("fetch", "cursor closed"),
        }
    }
}

#[async_trait]
impl<R: Send + Sync + 'static> Collection<R> for FailingCollection {
    async fn count(&self, _filter: &RecordFilter<'_, R>) -> Result<u64, StorageError> {
        Err(self.error.clone())
    }

    async fn fetch(
        &self,
        _filter: &RecordFilter<'_, R>,
        _order: &SortOrder<R>,
        _window: Window,
    ) -> Result<Vec<R>, StorageError> {
        Err(self.error.clone())
    }
}

/// Path and query of an absolute link, for replaying it against a TestServer
pub fn path_and_query(link: &str) -> String {
    let url = Url::parse(link).unwrap();
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

/// Decoded query pairs of an absolute link, in order
pub fn link_pairs(link: &str) -> Vec<(String, String)> {
    Url::parse(link)
        .unwrap()
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Value of `name` in an absolute link's query
pub fn link_param(link: &str, name: &str) -> Option<String> {
    link_pairs(link)
        .into_iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v)
}
