use async_trait::async_trait;

use sentinel_velocity::reorder::{recommend, ReorderPolicy};

use crate::hydrator::Hydrator;
use crate::types::{ProductCandidate, ProductQuery};

/// Attaches a reorder recommendation to every classified candidate.
///
/// Uses the supplier lead time on file, falling back to the configured
/// default, and the same velocity the classification was computed from.
/// A product the recommender rejects gets its error set instead.
pub struct ReorderHydrator {
    pub default_lead_time_days: u32,
    pub policy: ReorderPolicy,
}

impl ReorderHydrator {
    pub fn new(default_lead_time_days: u32, policy: ReorderPolicy) -> Self {
        Self {
            default_lead_time_days,
            policy,
        }
    }
}

#[async_trait]
impl Hydrator<ProductQuery, ProductCandidate> for ReorderHydrator {
    async fn hydrate(
        &self,
        query: &ProductQuery,
        candidates: &[ProductCandidate],
    ) -> Result<Vec<ProductCandidate>, String> {
        let hydrated = candidates
            .iter()
            .map(|c| {
                let (Some(classification), Some(position), Some(velocity)) =
                    (&c.classification, &c.position, c.effective_velocity())
                else {
                    return ProductCandidate::default();
                };
                let lead_time_days = c.lead_time_days.unwrap_or(self.default_lead_time_days);
                match recommend(
                    classification,
                    velocity,
                    lead_time_days,
                    position.current_stock,
                    &self.policy,
                ) {
                    Ok(recommendation) => ProductCandidate {
                        recommendation: Some(recommendation),
                        ..ProductCandidate::default()
                    },
                    Err(error) => {
                        log::warn!(
                            "request_id={} no reorder for {}: {}",
                            query.request_id,
                            c.product_id,
                            error
                        );
                        ProductCandidate {
                            error: Some(error),
                            ..ProductCandidate::default()
                        }
                    }
                }
            })
            .collect();

        Ok(hydrated)
    }

    fn update(&self, candidate: &mut ProductCandidate, hydrated: ProductCandidate) {
        candidate.recommendation = hydrated.recommendation;
        if hydrated.error.is_some() {
            candidate.error = hydrated.error;
        }
    }
}
