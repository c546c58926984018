//! In-memory implementation of Collection for testing and development

use crate::core::error::StorageError;
use crate::core::filter::RecordFilter;
use crate::core::sort::SortOrder;
use crate::core::store::{Collection, Window};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory collection
///
/// Records are kept in insertion order, which is also the order returned when
/// a listing is unsorted. Uses RwLock for thread-safe access; clones share the
/// same storage.
#[derive(Clone)]
pub struct InMemoryCollection<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> InMemoryCollection<R> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    /// Create a collection holding `records`, in that order
    pub fn from_records(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Append a record
    pub fn insert(&self, record: R) -> Result<(), StorageError> {
        self.records
            .write()
            .map_err(|e| StorageError::unavailable(format!("Failed to acquire write lock: {}", e)))?
            .push(record);
        Ok(())
    }

    /// Remove every record matching `predicate`, returning how many were removed
    pub fn remove_where(&self, predicate: impl Fn(&R) -> bool) -> Result<usize, StorageError> {
        let mut records = self.records.write().map_err(|e| {
            StorageError::unavailable(format!("Failed to acquire write lock: {}", e))
        })?;

        let before = records.len();
        records.retain(|r| !predicate(r));
        Ok(before - records.len())
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<R> Default for InMemoryCollection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> Collection<R> for InMemoryCollection<R>
where
    R: Clone + Send + Sync + 'static,
{
    async fn count(&self, filter: &RecordFilter<'_, R>) -> Result<u64, StorageError> {
        let records = self.records.read().map_err(|e| {
            StorageError::read_failed("count", format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn fetch(
        &self,
        filter: &RecordFilter<'_, R>,
        order: &SortOrder<R>,
        window: Window,
    ) -> Result<Vec<R>, StorageError> {
        let mut matching: Vec<R> = {
            let records = self.records.read().map_err(|e| {
                StorageError::read_failed("fetch", format!("Failed to acquire read lock: {}", e))
            })?;

            records.iter().filter(|r| filter.matches(r)).cloned().collect()
        };

        order.sort(&mut matching);

        let offset = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }
}
