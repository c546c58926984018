//! Scheduled events held at venues

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::filter::{ScopeFilter, TextField};
use crate::core::query::deserialize_query_datetime;
use crate::core::resource::{Listable, ListingSpec};
use crate::core::sort::{
    SortDirection, SortField, cmp_natural, cmp_option, cmp_option_natural,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub venue_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub capacity: Option<i32>,
    pub image_url: Option<String>,
}

/// `?venueId=&dateFrom=&dateTo=`
///
/// `dateFrom` bounds the start time from below, `dateTo` bounds the end time
/// from above; both inclusive. A bare date means midnight UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventScope {
    pub venue_id: Option<i64>,
    #[serde(deserialize_with = "deserialize_query_datetime")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_query_datetime")]
    pub date_to: Option<DateTime<Utc>>,
}

impl ScopeFilter<Event> for EventScope {
    fn matches(&self, record: &Event) -> bool {
        self.venue_id.is_none_or(|id| record.venue_id == id)
            && self.date_from.is_none_or(|from| record.starts_at >= from)
            && self.date_to.is_none_or(|to| record.ends_at <= to)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.venue_id {
            pairs.push(("venueId", id.to_string()));
        }
        if let Some(from) = self.date_from {
            pairs.push(("dateFrom", from.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }
        if let Some(to) = self.date_to {
            pairs.push(("dateTo", to.to_rfc3339_opts(SecondsFormat::AutoSi, true)));
        }
        pairs
    }
}

fn by_id(a: &Event, b: &Event) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}

impl Listable for Event {
    type Scope = EventScope;

    fn resource_name() -> &'static str {
        "events"
    }

    fn listing_spec() -> ListingSpec<Self> {
        ListingSpec::new(Self::resource_name())
            .sortable(vec![
                SortField::new("Id", by_id),
                SortField::new("VenueId", |a: &Self, b: &Self| {
                    a.venue_id.cmp(&b.venue_id)
                }),
                SortField::new("Title", |a: &Self, b: &Self| cmp_natural(&a.title, &b.title)),
                SortField::new("Description", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.description, &b.description)
                }),
                SortField::new("StartsAt", |a: &Self, b: &Self| {
                    a.starts_at.cmp(&b.starts_at)
                }),
                SortField::new("EndsAt", |a: &Self, b: &Self| a.ends_at.cmp(&b.ends_at)),
                SortField::new("Capacity", |a: &Self, b: &Self| {
                    cmp_option(&a.capacity, &b.capacity)
                }),
                SortField::new("ImageUrl", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.image_url, &b.image_url)
                }),
            ])
            .searchable(vec![
                TextField::new("Title", |e: &Self| Some(e.title.as_str())),
                TextField::new("Description", |e: &Self| e.description.as_deref()),
            ])
            .tie_break(SortField::new("Id", by_id))
            .default_sort("StartsAt", SortDirection::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn event(id: i64, venue_id: i64, day: u32) -> Event {
        let starts_at = Utc.with_ymd_and_hms(2025, 6, day, 18, 0, 0).unwrap();
        Event {
            id,
            venue_id,
            title: format!("Event {}", id),
            description: None,
            starts_at,
            ends_at: starts_at + Duration::hours(2),
            capacity: None,
            image_url: None,
        }
    }

    #[test]
    fn test_scope_by_venue_and_dates() {
        let scope = EventScope {
            venue_id: Some(1),
            date_from: Some(Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap()),
            date_to: Some(Utc.with_ymd_and_hms(2025, 6, 20, 0, 0, 0).unwrap()),
        };

        assert!(scope.matches(&event(1, 1, 15)));
        assert!(!scope.matches(&event(2, 2, 15)));
        assert!(!scope.matches(&event(3, 1, 5)));
        assert!(!scope.matches(&event(4, 1, 25)));
    }

    #[test]
    fn test_date_bounds_inclusive() {
        let e = event(1, 1, 10);
        let scope = EventScope {
            venue_id: None,
            date_from: Some(e.starts_at),
            date_to: Some(e.ends_at),
        };
        assert!(scope.matches(&e));
    }

    #[test]
    fn test_query_pairs_render_rfc3339() {
        let scope = EventScope {
            venue_id: Some(3),
            date_from: Some(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()),
            date_to: None,
        };
        assert_eq!(
            scope.query_pairs(),
            vec![
                ("venueId", "3".to_string()),
                ("dateFrom", "2025-01-02T03:04:05Z".to_string())
            ]
        );
    }

    #[test]
    fn test_scope_deserializes_from_query_names() {
        let scope: EventScope =
            serde_json::from_str(r#"{"venueId": 4, "dateTo": "2025-06-30T00:00:00Z"}"#).unwrap();
        assert_eq!(scope.venue_id, Some(4));
        assert!(scope.date_from.is_none());
        assert_eq!(
            scope.date_to,
            Some(Utc.with_ymd_and_hms(2025, 6, 30, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_scope_accepts_date_without_time_or_offset() {
        let scope: EventScope = serde_json::from_str(
            r#"{"dateFrom": "2025-06-10", "dateTo": "2025-06-12T18:30:00"}"#,
        )
        .unwrap();
        assert_eq!(
            scope.date_from,
            Some(Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(
            scope.date_to,
            Some(Utc.with_ymd_and_hms(2025, 6, 12, 18, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_scope_rejects_unparseable_date() {
        let result = serde_json::from_str::<EventScope>(r#"{"dateFrom": "10/06/2025"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sortable_allow_list() {
        let spec = Event::listing_spec();
        let names: Vec<&str> = spec.sortable_fields().collect();
        assert_eq!(
            names,
            vec![
                "Id",
                "VenueId",
                "Title",
                "Description",
                "StartsAt",
                "EndsAt",
                "Capacity",
                "ImageUrl"
            ]
        );
    }
}
