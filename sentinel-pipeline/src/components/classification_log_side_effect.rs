use async_trait::async_trait;
use std::sync::Arc;

use sentinel_velocity::types::StockStatus;

use crate::side_effect::{SideEffect, SideEffectInput};
use crate::types::{ProductCandidate, ProductQuery};
use crate::util::preview_ids;

/// Logs a one-line tier breakdown per request and the products needing
/// a reorder.
pub struct ClassificationLogSideEffect;

#[async_trait]
impl SideEffect<ProductQuery, ProductCandidate> for ClassificationLogSideEffect {
    async fn run(
        &self,
        input: Arc<SideEffectInput<ProductQuery, ProductCandidate>>,
    ) -> Result<(), String> {
        let selected = &input.selected_candidates;
        let breakdown: Vec<String> = StockStatus::ALL
            .iter()
            .map(|status| {
                let count = selected.iter().filter(|c| c.status() == Some(*status)).count();
                format!("{}={}", status, count)
            })
            .collect();

        log::info!(
            "request_id={} classified {} products [{}]",
            input.query.request_id,
            selected.len(),
            breakdown.join(" ")
        );

        let reorder: Vec<String> = selected
            .iter()
            .filter(|c| c.status().is_some_and(StockStatus::needs_reorder))
            .map(|c| c.product_id.clone())
            .collect();
        if !reorder.is_empty() {
            log::info!(
                "request_id={} reorder needed: {}",
                input.query.request_id,
                preview_ids(&reorder, 10)
            );
        }
        Ok(())
    }
}
