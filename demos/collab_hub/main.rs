//! Collaboration hub listing service
//!
//! Serves organizations, venues, events and assets from seeded in-memory
//! collections. Every resource gets paging, search and sorting from the same
//! pipeline:
//!
//! ```text
//! GET /api/v1/venues?q=Hall&sortBy=name&page=2
//! GET /api/v1/events?venueId=1&dateFrom=2025-06-01T00:00:00Z&skip=10&limit=5
//! ```
//!
//! Run with `RUST_LOG=listkit=debug` to see one event per listed page.

use chrono::{Duration, TimeZone};
use listkit::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "demos/collab_hub/listkit.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var("LISTKIT_CONFIG") {
        Ok(path) => ListingConfig::from_yaml_file(&path)?,
        Err(_) if std::path::Path::new(CONFIG_PATH).exists() => {
            ListingConfig::from_yaml_file(CONFIG_PATH)?
        }
        Err(_) => ListingConfig::default_config(),
    };

    let (organizations, venues, events, assets) = seed_data()?;
    tracing::info!(
        organizations = organizations.len(),
        venues = venues.len(),
        events = events.len(),
        assets = assets.len(),
        "Seeded collections"
    );

    ServerBuilder::new()
        .with_config(config)
        .register::<Organization>(InMemoryCollection::from_records(organizations))
        .register::<Venue>(InMemoryCollection::from_records(venues))
        .register::<Event>(InMemoryCollection::from_records(events))
        .register::<Asset>(InMemoryCollection::from_records(assets))
        .serve()
        .await
}

type Seed = (Vec<Organization>, Vec<Venue>, Vec<Event>, Vec<Asset>);

fn seed_data() -> Result<Seed> {
    let organizations = vec![
        Organization {
            id: 1,
            name: "Riverside Arts".to_string(),
            description: Some("Community theatre and music collective".to_string()),
        },
        Organization {
            id: 2,
            name: "Harbor Labs".to_string(),
            description: Some("Maker space and tech meetups".to_string()),
        },
        Organization {
            id: 3,
            name: "City Library".to_string(),
            description: None,
        },
    ];

    let venues = vec![
        Venue {
            id: 1,
            organization_id: 1,
            name: "Main Hall".to_string(),
            address: Some("12 River Road".to_string()),
            latitude: Some(50.4501),
            longitude: Some(30.5234),
        },
        Venue {
            id: 2,
            organization_id: 1,
            name: "Studio B".to_string(),
            address: Some("14 River Road".to_string()),
            latitude: Some(50.4503),
            longitude: Some(30.5241),
        },
        Venue {
            id: 3,
            organization_id: 2,
            name: "Workshop Floor".to_string(),
            address: Some("3 Dock Street".to_string()),
            latitude: None,
            longitude: None,
        },
        Venue {
            id: 4,
            organization_id: 3,
            name: "Reading Room".to_string(),
            address: None,
            latitude: Some(50.4470),
            longitude: Some(30.5120),
        },
    ];

    let first_night = Utc
        .with_ymd_and_hms(2025, 6, 1, 19, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid seed date"))?;

    let titles = ["Open Mic", "Jazz Night", "Robotics Meetup", "Poetry Reading"];
    let events: Vec<Event> = (1..=40)
        .map(|i: i64| {
            let starts_at = first_night + Duration::days(i / 2) + Duration::hours(i % 2);
            Event {
                id: i,
                venue_id: (i % 4) + 1,
                title: format!("{} #{}", titles[(i % 4) as usize], i),
                description: (i % 3 == 0).then(|| "Free entry".to_string()),
                starts_at,
                ends_at: starts_at + Duration::hours(2),
                capacity: (i % 5 != 0).then(|| (40 + i * 5) as i32),
                image_url: None,
            }
        })
        .collect();

    let assets: Vec<Asset> = (1..=60)
        .map(|i: i64| Asset {
            id: i,
            event_id: (i % 40) + 1,
            file_path: format!("/uploads/{:05}.bin", i),
            original_file_name: Some(if i % 2 == 0 {
                format!("poster-{}.png", i)
            } else {
                format!("program-{}.pdf", i)
            }),
            content_type: Some(
                if i % 2 == 0 { "image/png" } else { "application/pdf" }.to_string(),
            ),
            uploaded_at: first_night - Duration::days(30) + Duration::minutes(i * 17),
        })
        .collect();

    Ok((organizations, venues, events, assets))
}
