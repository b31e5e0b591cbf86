use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{ProductCandidate, ProductQuery};

/// Keeps only candidates whose status is in the query's status filter.
/// Runs only when the query sets one.
pub struct StatusFilter;

#[async_trait]
impl Filter<ProductQuery, ProductCandidate> for StatusFilter {
    fn enable(&self, query: &ProductQuery) -> bool {
        query.status_filter.is_some()
    }

    async fn filter(
        &self,
        query: &ProductQuery,
        candidates: Vec<ProductCandidate>,
    ) -> Result<FilterResult<ProductCandidate>, String> {
        let wanted = query.status_filter.as_deref().unwrap_or(&[]);
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.status().is_some_and(|s| wanted.contains(&s)));

        Ok(FilterResult { kept, removed })
    }
}
