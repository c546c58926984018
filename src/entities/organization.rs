//! Organizations owning venues

use serde::{Deserialize, Serialize};

use crate::core::filter::{TextField, Unscoped};
use crate::core::resource::{Listable, ListingSpec};
use crate::core::sort::{SortDirection, SortField, cmp_natural, cmp_option_natural};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

fn by_id(a: &Organization, b: &Organization) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}

impl Listable for Organization {
    type Scope = Unscoped;

    fn resource_name() -> &'static str {
        "organizations"
    }

    fn listing_spec() -> ListingSpec<Self> {
        ListingSpec::new(Self::resource_name())
            .sortable(vec![
                SortField::new("Id", by_id),
                SortField::new("Name", |a: &Self, b: &Self| cmp_natural(&a.name, &b.name)),
                SortField::new("Description", |a: &Self, b: &Self| {
                    cmp_option_natural(&a.description, &b.description)
                }),
            ])
            .searchable(vec![
                TextField::new("Name", |o: &Self| Some(o.name.as_str())),
                TextField::new("Description", |o: &Self| o.description.as_deref()),
            ])
            .tie_break(SortField::new("Id", by_id))
            .default_sort("Name", SortDirection::Ascending)
    }
}
