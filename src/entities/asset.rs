//! Uploaded files attached to events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::filter::{ScopeFilter, TextField};
use crate::core::resource::{Listable, ListingSpec};
use crate::core::sort::{SortDirection, SortField, cmp_natural, cmp_option_natural};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub event_id: i64,

    /// Relative storage path, e.g. `/uploads/abc.png`
    pub file_path: String,
    pub original_file_name: Option<String>,
    pub content_type: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// `?eventId=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssetScope {
    pub event_id: Option<i64>,
}

impl ScopeFilter<Asset> for AssetScope {
    fn matches(&self, record: &Asset) -> bool {
        self.event_id.is_none_or(|id| record.event_id == id)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.event_id
            .map(|id| vec![("eventId", id.to_string())])
            .unwrap_or_default()
    }
}

fn by_id(a: &Asset, b: &Asset) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}

impl Listable for Asset {
    type Scope = AssetScope;

    fn resource_name() -> &'static str {
        "assets"
    }

    fn listing_spec() -> ListingSpec<Self> {
        ListingSpec::new(Self::resource_name())
            .sortable(vec![
                SortField::new("Id", by_id),
                SortField::new("EventId", |a: &Self, b: &Self| {
                    a.event_id.cmp(&b.event_id)
                }),
                SortField::new("FilePath", |a: &Self, b: &Self| {
                    cmp_natural(&a.file_path, &b.file_path)
                }),
                SortField::new("OriginalFileName", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.original_file_name, &b.original_file_name)
                }),
                SortField::new("ContentType", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.content_type, &b.content_type)
                }),
                SortField::new("UploadedAt", |a: &Self, b: &Self| {
                    a.uploaded_at.cmp(&b.uploaded_at)
                }),
            ])
            .searchable(vec![
                TextField::new("OriginalFileName", |a: &Self| {
                    a.original_file_name.as_deref()
                }),
                TextField::new("ContentType", |a: &Self| a.content_type.as_deref()),
                TextField::new("FilePath", |a: &Self| Some(a.file_path.as_str())),
            ])
            .tie_break(SortField::new("Id", by_id))
            .default_sort("UploadedAt", SortDirection::Descending)
    }
}
