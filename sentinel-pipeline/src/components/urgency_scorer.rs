use async_trait::async_trait;

use sentinel_velocity::types::StockStatus;

use crate::scorer::Scorer;
use crate::types::{ProductCandidate, ProductQuery};

/// Ranks candidates by how soon they need attention.
///
/// Score = tier weight + 1 / (1 + days_of_stock), so tiers never overlap
/// and fewer days ranks higher within a tier.
pub struct UrgencyScorer;

pub fn tier_weight(status: StockStatus) -> f64 {
    match status {
        StockStatus::OutOfStock => 5.0,
        StockStatus::Critical => 4.0,
        StockStatus::Low => 3.0,
        StockStatus::DeadStock => 1.0,
        StockStatus::Healthy => 0.0,
    }
}

pub fn urgency(status: StockStatus, days_of_stock: u64) -> f64 {
    tier_weight(status) + 1.0 / (1.0 + days_of_stock as f64)
}

#[async_trait]
impl Scorer<ProductQuery, ProductCandidate> for UrgencyScorer {
    async fn score(
        &self,
        _query: &ProductQuery,
        candidates: &[ProductCandidate],
    ) -> Result<Vec<ProductCandidate>, String> {
        let scored = candidates
            .iter()
            .map(|c| ProductCandidate {
                urgency_score: c
                    .classification
                    .as_ref()
                    .map(|cls| urgency(cls.status, cls.days_of_stock)),
                ..ProductCandidate::default()
            })
            .collect();

        Ok(scored)
    }

    fn update(&self, candidate: &mut ProductCandidate, scored: ProductCandidate) {
        candidate.urgency_score = scored.urgency_score;
    }
}
