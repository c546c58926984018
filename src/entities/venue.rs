//! Venues hosting events

use serde::{Deserialize, Serialize};

use crate::core::filter::{ScopeFilter, TextField};
use crate::core::resource::{Listable, ListingSpec};
use crate::core::sort::{
    SortDirection, SortField, cmp_natural, cmp_option_f64, cmp_option_natural,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// `?organizationId=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VenueScope {
    pub organization_id: Option<i64>,
}

impl ScopeFilter<Venue> for VenueScope {
    fn matches(&self, record: &Venue) -> bool {
        self.organization_id
            .is_none_or(|id| record.organization_id == id)
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.organization_id
            .map(|id| vec![("organizationId", id.to_string())])
            .unwrap_or_default()
    }
}

fn by_id(a: &Venue, b: &Venue) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}

impl Listable for Venue {
    type Scope = VenueScope;

    fn resource_name() -> &'static str {
        "venues"
    }

    fn listing_spec() -> ListingSpec<Self> {
        ListingSpec::new(Self::resource_name())
            .sortable(vec![
                SortField::new("Id", by_id),
                SortField::new("OrganizationId", |a: &Self, b: &Self| {
                    a.organization_id.cmp(&b.organization_id)
                }),
                SortField::new("Name", |a: &Self, b: &Self| cmp_natural(&a.name, &b.name)),
                SortField::new("Address", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.address, &b.address)
                }),
                SortField::new("Latitude", |a: &Self, b: &Self| {
                    cmp_option_f64(&a.latitude, &b.latitude)
                }),
                SortField::new("Longitude", |a: &Self, b: &Self| {
                    cmp_option_f64(&a.longitude, &b.longitude)
                }),
            ])
            .searchable(vec![
                TextField::new("Name", |v: &Self| Some(v.name.as_str())),
                TextField::new("Address", |v: &Self| v.address.as_deref()),
            ])
            .tie_break(SortField::new("Id", by_id))
            .default_sort("Name", SortDirection::Ascending)
    }
}
