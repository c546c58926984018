//! Resource kinds served by the collaboration hub API
//!
//! Each module declares a record type, its scope filters, and its listing
//! allow-lists. The four share one listing pipeline.

pub mod asset;
pub mod event;
pub mod organization;
pub mod venue;

pub use asset::{Asset, AssetScope};
pub use event::{Event, EventScope};
pub use organization::Organization;
pub use venue::{Venue, VenueScope};
