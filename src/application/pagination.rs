//! Generic pagination engine
//!
//! Normalises paging options, asks a [`PageSource`] for the total count and
//! the requested window, and assembles a [`Page`].

use std::sync::Arc;

use tracing::debug;

use crate::domain::PageSource;
use crate::shared::{DomainResult, Page, PageWindow, QueryOptions};

pub struct PaginationEngine<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for PaginationEngine<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S: PageSource + ?Sized> PaginationEngine<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Query one page of documents matching `filter`.
    ///
    /// Store errors are returned as-is. The count and the window are read
    /// independently, so concurrent writes may make them disagree.
    pub async fn paginate(
        &self,
        filter: &S::Filter,
        options: &QueryOptions,
    ) -> DomainResult<Page<S::Item>> {
        let limit = options.normalized_limit();
        let page = options.normalized_page();
        let window = PageWindow {
            sort: options.sort_keys(),
            skip: (page - 1).saturating_mul(limit),
            limit,
            populate: options.populate_fields(),
        };

        let (total_results, results) = tokio::try_join!(
            self.source.count_matching(filter),
            self.source.find_matching(filter, &window),
        )?;

        debug!(
            page,
            limit,
            skip = window.skip,
            total_results,
            returned = results.len(),
            "Paginated query"
        );

        Ok(Page::new(results, total_results, page, limit))
    }
}
