//! Backing collection trait

use async_trait::async_trait;

use crate::core::error::StorageError;
use crate::core::filter::RecordFilter;
use crate::core::sort::SortOrder;

/// A window into an ordered, filtered collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u64,
}

/// Read access to a collection of `R`
///
/// The listing engine only reads. Implementations decide how filters and
/// ordering are executed (in memory, translated to SQL, ...). `count` and
/// `fetch` are separate calls; the engine does not assume they observe the
/// same snapshot, so concurrent writers may make `total` drift slightly from
/// what `fetch` returns.
#[async_trait]
pub trait Collection<R: Send + Sync + 'static>: Send + Sync {
    /// Count records matching `filter`, ignoring ordering and windowing
    async fn count(&self, filter: &RecordFilter<'_, R>) -> Result<u64, StorageError>;

    /// Fetch matching records in `order`, skipping `window.offset` and taking
    /// at most `window.limit`
    ///
    /// An offset past the end yields an empty vector, not an error.
    async fn fetch(
        &self,
        filter: &RecordFilter<'_, R>,
        order: &SortOrder<R>,
        window: Window,
    ) -> Result<Vec<R>, StorageError>;
}
