//! Paged response envelope

use serde::{Deserialize, Serialize};

use crate::core::executor::Slice;
use crate::core::link::{LinkTarget, next_link};
use crate::core::query::{NormalizedQuery, RawQuery};

/// Paged result returned by every listing endpoint
///
/// ```json
/// {
///   "items": [ ... ],
///   "total": 25,
///   "page": 2,
///   "pageSize": 10,
///   "hasNext": true,
///   "nextLink": "https://host/api/v1/venues?page=3&pageSize=10&sortBy=Name&sortDir=asc"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,

    /// Matches ignoring offset/limit
    pub total: u64,

    /// Caller-facing page number
    pub page: u64,

    /// Effective (clamped) page size
    pub page_size: u64,

    pub has_next: bool,

    /// Present exactly when `has_next` is
    pub next_link: Option<String>,
}

impl<T> PageEnvelope<T> {
    /// Assemble the envelope for one executed listing
    ///
    /// `scope` holds the resource filter parameters present on the request,
    /// to be carried into `next_link`.
    pub fn build(
        query: &NormalizedQuery,
        raw: &RawQuery,
        slice: Slice<T>,
        target: &LinkTarget,
        scope: Vec<(&'static str, String)>,
    ) -> Self {
        let returned = slice.items.len() as u64;
        let has_next = query.offset().saturating_add(returned) < slice.total;
        let next_link = has_next.then(|| next_link(target, query, raw, scope));

        Self {
            items: slice.items,
            total: slice.total,
            page: query.page(),
            page_size: query.limit(),
            has_next,
            next_link,
        }
    }

    /// Map items, keeping paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            has_next: self.has_next,
            next_link: self.next_link,
        }
    }
}
