//! Core module containing the listing pipeline and its building blocks

pub mod envelope;
pub mod error;
pub mod executor;
pub mod filter;
pub mod link;
pub mod listing;
pub mod query;
pub mod resource;
pub mod sort;
pub mod store;

pub use envelope::PageEnvelope;
pub use error::{ConfigError, ErrorResponse, ListingError, RequestError, StorageError};
pub use executor::{Slice, execute};
pub use filter::{RecordFilter, ScopeFilter, TextField, TextFilter, Unscoped};
pub use link::{LinkTarget, next_link};
pub use query::{
    Addressing, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, NormalizedQuery, RawQuery, parse_query_datetime,
};
pub use resource::{Listable, ListingSpec};
pub use sort::{DefaultSort, SortDirection, SortField, SortOrder};
pub use store::{Collection, Window};
