use async_trait::async_trait;

use crate::filter::{Filter, FilterResult};
use crate::types::{ProductCandidate, ProductQuery};

/// Removes candidates the source could not evaluate. They stay in the
/// pipeline's filtered set so callers can report them as failures.
pub struct FailedProductFilter;

#[async_trait]
impl Filter<ProductQuery, ProductCandidate> for FailedProductFilter {
    async fn filter(
        &self,
        query: &ProductQuery,
        candidates: Vec<ProductCandidate>,
    ) -> Result<FilterResult<ProductCandidate>, String> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.error.is_none() && c.classification.is_some());

        if !removed.is_empty() {
            log::warn!(
                "request_id={} {} products could not be classified",
                query.request_id,
                removed.len()
            );
        }
        Ok(FilterResult { kept, removed })
    }
}
