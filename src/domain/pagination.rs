//! Page source port
//!
//! The two reads the pagination engine needs from a store. Filtering,
//! ordering and relation population are the store's job.

use async_trait::async_trait;

use crate::shared::{DomainResult, PageWindow};

#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Filter: Send + Sync;

    /// Number of documents matching `filter`, ignoring any window.
    async fn count_matching(&self, filter: &Self::Filter) -> DomainResult<u64>;

    /// Documents matching `filter`, sorted, skipped and limited per `window`,
    /// with the requested relations populated.
    async fn find_matching(
        &self,
        filter: &Self::Filter,
        window: &PageWindow,
    ) -> DomainResult<Vec<Self::Item>>;
}
