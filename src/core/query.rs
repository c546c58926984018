//! Query parameters and the parameter normalizer
//!
//! Listing endpoints accept two addressing conventions:
//!
//! - page addressing: `?page=2&pageSize=20`
//! - offset addressing: `?skip=40&limit=20`
//!
//! [`RawQuery::normalize`] resolves either one into a single [`NormalizedQuery`]
//! and remembers which convention was used, so the continuation link can be
//! written back in the caller's own terms.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};

use crate::core::sort::{DefaultSort, SortDirection};

/// Items per page when the caller does not say
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Hard upper bound on items per page
pub const MAX_PAGE_SIZE: u64 = 100;

/// Untrusted listing parameters as they arrive on the query string
///
/// Every field is optional. Numeric fields are signed so that out-of-range
/// values (`page=0`, `limit=-5`) reach the normalizer and get clamped there
/// instead of being rejected by the extractor.
///
/// # Example
/// ```rust,ignore
/// pub async fn list_assets(Query(raw): Query<RawQuery>) { /* ... */ }
///
/// // GET /api/v1/assets?page=2&pageSize=20&q=png&sortBy=UploadedAt&sortDir=desc
/// // GET /api/v1/assets?skip=40&limit=20
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawQuery {
    /// 1-based page number
    pub page: Option<i64>,

    /// Items per page (page addressing)
    pub page_size: Option<i64>,

    /// Absolute number of records to skip (offset addressing)
    pub skip: Option<i64>,

    /// Maximum number of records to return (offset addressing)
    pub limit: Option<i64>,

    /// Free-text search term
    pub q: Option<String>,

    /// Name of the attribute to sort by
    pub sort_by: Option<String>,

    /// `asc` or `desc`
    pub sort_dir: Option<String>,
}

/// The addressing convention a request used, resolved once at the boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `page` / `pageSize`
    Page { page: u64, page_size: u64 },

    /// `skip` / `limit`
    Offset { skip: u64, limit: u64 },
}

impl Addressing {
    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Addressing::Page { .. } => "page",
            Addressing::Offset { .. } => "offset",
        }
    }
}

/// Canonical form of a listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuery {
    pub addressing: Addressing,

    /// Requested sort field, or the resource default when none was given
    pub sort_by: Option<String>,

    pub sort_dir: SortDirection,

    /// Trimmed search term; `None` when absent or blank
    pub filter_text: Option<String>,
}

impl NormalizedQuery {
    /// Number of matching records to skip
    pub fn offset(&self) -> u64 {
        match self.addressing {
            Addressing::Page { page, page_size } => (page - 1).saturating_mul(page_size),
            Addressing::Offset { skip, .. } => skip,
        }
    }

    /// Maximum number of records to return, always in `[1, MAX_PAGE_SIZE]`
    pub fn limit(&self) -> u64 {
        match self.addressing {
            Addressing::Page { page_size, .. } => page_size,
            Addressing::Offset { limit, .. } => limit,
        }
    }

    /// Caller-facing page number
    ///
    /// Offset addressing reports `offset / limit + 1`. This is approximate
    /// when `skip` is not a multiple of `limit`.
    pub fn page(&self) -> u64 {
        match self.addressing {
            Addressing::Page { page, .. } => page,
            Addressing::Offset { skip, limit } => skip / limit + 1,
        }
    }
}

impl RawQuery {
    /// Whether the caller asked for offset addressing
    ///
    /// Either `skip` or `limit` is enough; offset addressing always wins over
    /// page addressing.
    pub fn uses_offset(&self) -> bool {
        self.skip.is_some() || self.limit.is_some()
    }

    /// Resolve the raw parameters into a [`NormalizedQuery`]
    ///
    /// `default_sort` fills in `sortBy` / `sortDir` when the caller left them
    /// out. Never fails: out-of-range values are clamped.
    pub fn normalize(&self, default_sort: Option<&DefaultSort>) -> NormalizedQuery {
        let addressing = if self.uses_offset() {
            let limit = self.limit.or(self.page_size);
            Addressing::Offset {
                skip: self.skip.unwrap_or(0).max(0) as u64,
                limit: clamp_page_size(limit),
            }
        } else {
            Addressing::Page {
                page: self.page.unwrap_or(1).max(1) as u64,
                page_size: clamp_page_size(self.page_size),
            }
        };

        let sort_by = self
            .sort_by
            .clone()
            .or_else(|| default_sort.map(|d| d.field.clone()));

        let sort_dir = match &self.sort_dir {
            Some(token) => SortDirection::parse(token),
            None => default_sort
                .map(|d| d.direction)
                .unwrap_or(SortDirection::Ascending),
        };

        let filter_text = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        NormalizedQuery {
            addressing,
            sort_by,
            sort_dir,
            filter_text,
        }
    }
}

fn clamp_page_size(requested: Option<i64>) -> u64 {
    requested
        .unwrap_or(DEFAULT_PAGE_SIZE as i64)
        .clamp(1, MAX_PAGE_SIZE as i64) as u64
}

/// Parse a date/time query value
///
/// Accepts RFC 3339 (`2025-06-10T19:00:00+02:00`), a date-time without an
/// offset (`2025-06-10T19:00:00`, taken as UTC) and a bare date
/// (`2025-06-10`, midnight UTC).
pub fn parse_query_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `deserialize_with` helper for optional date/time scope parameters
///
/// An empty value counts as absent; see [`parse_query_datetime`] for the
/// accepted forms.
///
/// # Example
/// ```rust,ignore
/// #[derive(Deserialize)]
/// #[serde(default, rename_all = "camelCase")]
/// pub struct EventScope {
///     #[serde(deserialize_with = "deserialize_query_datetime")]
///     pub date_from: Option<DateTime<Utc>>,
/// }
/// ```
pub fn deserialize_query_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    parse_query_datetime(&raw).map(Some).ok_or_else(|| {
        de::Error::custom(format!(
            "invalid date '{}', expected RFC 3339, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DD",
            raw
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw() -> RawQuery {
        RawQuery::default()
    }

    #[test]
    fn test_defaults_use_page_addressing() {
        let query = raw().normalize(None);
        assert_eq!(
            query.addressing,
            Addressing::Page {
                page: 1,
                page_size: 10
            }
        );
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.page(), 1);
        assert_eq!(query.sort_dir, SortDirection::Ascending);
        assert!(query.sort_by.is_none());
        assert!(query.filter_text.is_none());
    }

    #[test]
    fn test_page_addressing_offset() {
        let query = RawQuery {
            page: Some(3),
            page_size: Some(20),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.offset(), 40);
        assert_eq!(query.limit(), 20);
        assert_eq!(query.page(), 3);
    }

    #[test]
    fn test_offset_addressing_offset() {
        let query = RawQuery {
            skip: Some(5),
            limit: Some(20),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.addressing, Addressing::Offset { skip: 5, limit: 20 });
        assert_eq!(query.offset(), 5);
        assert_eq!(query.limit(), 20);
    }

    #[test]
    fn test_offset_wins_over_page() {
        let query = RawQuery {
            page: Some(4),
            page_size: Some(10),
            skip: Some(7),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.offset(), 7);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.addressing.label(), "offset");
    }

    #[test]
    fn test_limit_alone_selects_offset_mode_from_zero() {
        let query = RawQuery {
            page: Some(3),
            limit: Some(15),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.addressing, Addressing::Offset { skip: 0, limit: 15 });
    }

    #[test]
    fn test_page_size_limit_clamped() {
        for (requested, expected) in [
            (-5, 1),
            (0, 1),
            (1, 1),
            (50, 50),
            (100, 100),
            (101, 100),
            (i64::MAX, 100),
        ] {
            let paged = RawQuery {
                page_size: Some(requested),
                ..raw()
            }
            .normalize(None);
            assert_eq!(paged.limit(), expected, "pageSize={}", requested);

            let offset = RawQuery {
                limit: Some(requested),
                ..raw()
            }
            .normalize(None);
            assert_eq!(offset.limit(), expected, "limit={}", requested);
        }
    }

    #[test]
    fn test_page_coerced_to_one() {
        for requested in [0, -1, i64::MIN] {
            let query = RawQuery {
                page: Some(requested),
                ..raw()
            }
            .normalize(None);
            assert_eq!(query.page(), 1);
            assert_eq!(query.offset(), 0);
        }
    }

    #[test]
    fn test_negative_skip_treated_as_zero() {
        let query = RawQuery {
            skip: Some(-30),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_offset_mode_falls_back_to_page_size() {
        let query = RawQuery {
            skip: Some(10),
            page_size: Some(25),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.limit(), 25);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let query = RawQuery {
            page: Some(i64::MAX),
            page_size: Some(100),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.offset(), u64::MAX);
    }

    #[test]
    fn test_reported_page_in_offset_mode() {
        let aligned = RawQuery {
            skip: Some(40),
            limit: Some(20),
            ..raw()
        }
        .normalize(None);
        assert_eq!(aligned.page(), 3);

        // not limit-aligned: integer division, no rounding
        let unaligned = RawQuery {
            skip: Some(45),
            limit: Some(20),
            ..raw()
        }
        .normalize(None);
        assert_eq!(unaligned.page(), 3);
    }

    #[test]
    fn test_filter_text_trimmed() {
        let query = RawQuery {
            q: Some("  hall ".to_string()),
            ..raw()
        }
        .normalize(None);
        assert_eq!(query.filter_text.as_deref(), Some("hall"));

        let blank = RawQuery {
            q: Some("   ".to_string()),
            ..raw()
        }
        .normalize(None);
        assert!(blank.filter_text.is_none());
    }

    #[test]
    fn test_default_sort_applied_when_absent() {
        let default = DefaultSort::new("UploadedAt", SortDirection::Descending);

        let query = raw().normalize(Some(&default));
        assert_eq!(query.sort_by.as_deref(), Some("UploadedAt"));
        assert_eq!(query.sort_dir, SortDirection::Descending);

        let explicit = RawQuery {
            sort_by: Some("contentType".to_string()),
            sort_dir: Some("ASC".to_string()),
            ..raw()
        }
        .normalize(Some(&default));
        assert_eq!(explicit.sort_by.as_deref(), Some("contentType"));
        assert_eq!(explicit.sort_dir, SortDirection::Ascending);
    }

    #[test]
    fn test_raw_query_deserializes_camel_case() {
        let raw: RawQuery =
            serde_json::from_str(r#"{"pageSize": 20, "sortBy": "Name", "sortDir": "desc"}"#)
                .expect("deserialize should succeed");
        assert_eq!(raw.page_size, Some(20));
        assert_eq!(raw.sort_by.as_deref(), Some("Name"));
        assert_eq!(raw.sort_dir.as_deref(), Some("desc"));
        assert!(raw.page.is_none());
    }

    #[test]
    fn test_query_datetime_forms() {
        let midnight = Utc.with_ymd_and_hms(2025, 6, 10, 0, 0, 0).unwrap();

        assert_eq!(parse_query_datetime("2025-06-10T00:00:00Z"), Some(midnight));
        assert_eq!(parse_query_datetime("2025-06-10T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_query_datetime("2025-06-10T00:00:00"), Some(midnight));
        assert_eq!(parse_query_datetime("2025-06-10 00:00:00"), Some(midnight));
        assert_eq!(parse_query_datetime("2025-06-10"), Some(midnight));
        let evening = Utc.with_ymd_and_hms(2025, 6, 10, 19, 30, 0).unwrap();
        assert_eq!(
            parse_query_datetime("2025-06-10T19:30:00.250"),
            Some(evening + chrono::Duration::milliseconds(250))
        );
    }

    #[test]
    fn test_query_datetime_rejects_garbage() {
        assert_eq!(parse_query_datetime("June 10"), None);
        assert_eq!(parse_query_datetime("2025-13-01"), None);
        assert_eq!(parse_query_datetime(""), None);
    }
}
