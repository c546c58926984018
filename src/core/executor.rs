//! Collection executor
//!
//! Runs one listing read against a [`Collection`]: count the matches, then
//! fetch the requested window in order. No retries; a storage failure from
//! either call is returned as-is.

use crate::core::error::StorageError;
use crate::core::filter::RecordFilter;
use crate::core::sort::SortOrder;
use crate::core::store::{Collection, Window};

/// One window of matching records plus the total match count
#[derive(Debug, Clone, PartialEq)]
pub struct Slice<R> {
    pub items: Vec<R>,

    /// All matches, ignoring the window
    pub total: u64,
}

/// Count, then fetch
pub async fn execute<R>(
    collection: &dyn Collection<R>,
    filter: &RecordFilter<'_, R>,
    order: &SortOrder<R>,
    window: Window,
) -> Result<Slice<R>, StorageError>
where
    R: Send + Sync + 'static,
{
    let total = collection.count(filter).await?;
    let mut items = collection.fetch(filter, order, window).await?;

    // A collection must never hand back more than the window asked for.
    items.truncate(usize::try_from(window.limit).unwrap_or(usize::MAX));

    Ok(Slice { items, total })
}
