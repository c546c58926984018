//! The listing pipeline
//!
//! normalize → filter → sort → execute → envelope
//!
//! Each call is independent and stateless; the only side effect is the read
//! against the backing collection.

use crate::core::envelope::PageEnvelope;
use crate::core::error::ListingError;
use crate::core::executor::execute;
use crate::core::filter::{RecordFilter, ScopeFilter, TextFilter};
use crate::core::link::LinkTarget;
use crate::core::query::RawQuery;
use crate::core::resource::ListingSpec;
use crate::core::sort::SortOrder;
use crate::core::store::{Collection, Window};

impl<R> ListingSpec<R>
where
    R: Send + Sync + 'static,
{
    /// Serve one listing request
    ///
    /// Only a storage failure can make this fail; every other oddity in the
    /// query (out-of-range paging, unknown sort field) is absorbed.
    pub async fn list(
        &self,
        collection: &dyn Collection<R>,
        raw: &RawQuery,
        scope: &dyn ScopeFilter<R>,
        target: &LinkTarget,
    ) -> Result<PageEnvelope<R>, ListingError> {
        let query = raw.normalize(self.default_sort.as_ref());

        let text = TextFilter::new(query.filter_text.as_deref(), &self.searchable);
        let filter = RecordFilter::new(scope, text);

        let order = SortOrder::resolve(
            &self.sortable,
            query.sort_by.as_deref(),
            query.sort_dir,
            self.tie_break,
        );
        if let Some(requested) = query.sort_by.as_deref() {
            if !matches!(order, SortOrder::Field { .. }) {
                tracing::debug!(
                    resource = self.resource,
                    sort_by = requested,
                    fallback = order.field_name().unwrap_or("none"),
                    "Unknown sort field, falling back"
                );
            }
        }

        let window = Window {
            offset: query.offset(),
            limit: query.limit(),
        };

        let slice = execute(collection, &filter, &order, window)
            .await
            .inspect_err(|e| {
                tracing::warn!(resource = self.resource, error = %e, "Listing read failed");
            })?;

        tracing::debug!(
            resource = self.resource,
            mode = query.addressing.label(),
            offset = window.offset,
            limit = window.limit,
            total = slice.total,
            returned = slice.items.len(),
            "Listed records"
        );

        Ok(PageEnvelope::build(
            &query,
            raw,
            slice,
            target,
            scope.query_pairs(),
        ))
    }
}
