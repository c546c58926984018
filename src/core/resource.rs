//! Listable resources and their listing configuration

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ResourceConfig;
use crate::core::filter::{ScopeFilter, TextField};
use crate::core::sort::{DefaultSort, SortDirection, SortField};

/// A record type served by a listing endpoint
///
/// # Example
///
/// ```rust,ignore
/// impl Listable for Organization {
///     type Scope = Unscoped;
///
///     fn resource_name() -> &'static str {
///         "organizations"
///     }
///
///     fn listing_spec() -> ListingSpec<Self> {
///         ListingSpec::new(Self::resource_name())
///             .sortable(vec![SortField::new("Name", |a: &Self, b: &Self| a.name.cmp(&b.name))])
///             .searchable(vec![TextField::new("Name", |o: &Self| Some(o.name.as_str()))])
///             .default_sort("Name", SortDirection::Ascending)
///     }
/// }
/// ```
pub trait Listable: Clone + Serialize + Send + Sync + 'static {
    /// Resource-specific filters read from the query string
    type Scope: ScopeFilter<Self> + DeserializeOwned + Default + Send + Sync + 'static;

    /// Plural name used in URLs (e.g., "venues")
    fn resource_name() -> &'static str;

    /// Sortable/searchable attributes and defaults
    fn listing_spec() -> ListingSpec<Self>;
}

/// Listing configuration for one resource
pub struct ListingSpec<R> {
    pub(crate) resource: &'static str,
    pub(crate) sortable: Vec<SortField<R>>,
    pub(crate) searchable: Vec<TextField<R>>,
    pub(crate) tie_break: Option<SortField<R>>,
    pub(crate) default_sort: Option<DefaultSort>,
}

impl<R> ListingSpec<R> {
    /// Empty spec: nothing sortable, nothing searchable
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            sortable: Vec::new(),
            searchable: Vec::new(),
            tie_break: None,
            default_sort: None,
        }
    }

    /// Allow-list of sortable attributes
    pub fn sortable(mut self, fields: Vec<SortField<R>>) -> Self {
        self.sortable = fields;
        self
    }

    /// Attributes searched by `q`
    pub fn searchable(mut self, fields: Vec<TextField<R>>) -> Self {
        self.searchable = fields;
        self
    }

    /// Fixed secondary key making the ordering total
    pub fn tie_break(mut self, field: SortField<R>) -> Self {
        self.tie_break = Some(field);
        self
    }

    /// Sort used when the request names none
    pub fn default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(DefaultSort::new(field, direction));
        self
    }

    /// Apply configuration overrides
    pub fn with_config(mut self, config: Option<&ResourceConfig>) -> Self {
        let Some(config) = config else {
            return self;
        };

        let current = self.default_sort.take();
        let direction = config
            .default_sort_dir
            .or(current.as_ref().map(|d| d.direction))
            .unwrap_or_default();

        self.default_sort = match (&config.default_sort_by, current) {
            (Some(field), _) => Some(DefaultSort::new(field.clone(), direction)),
            (None, Some(current)) => Some(DefaultSort::new(current.field, direction)),
            (None, None) => None,
        };
        self
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    pub fn sortable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sortable.iter().map(|f| f.name())
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.searchable.iter().map(|f| f.name())
    }

    pub fn default_sort_ref(&self) -> Option<&DefaultSort> {
        self.default_sort.as_ref()
    }
}
