//! Dashboard roll-up of a classified product list.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use sentinel_velocity::types::StockStatus;

use crate::types::ProductCandidate;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StockHealthSummary {
    pub report_date: Option<NaiveDate>,
    pub total_products: usize,
    /// Products per tier. Every tier is present, including empty ones.
    pub counts: BTreeMap<StockStatus, usize>,
    pub failures: usize,
    /// Products in a reorder tier, most urgent first.
    pub needs_reorder: Vec<String>,
    pub total_recommended_units: u64,
}

impl StockHealthSummary {
    /// Summarize classified candidates in the order given.
    pub fn from_candidates(
        report_date: Option<NaiveDate>,
        candidates: &[ProductCandidate],
        failures: usize,
    ) -> Self {
        let mut counts: BTreeMap<StockStatus, usize> =
            StockStatus::ALL.iter().map(|s| (*s, 0)).collect();
        let mut needs_reorder = Vec::new();
        let mut total_recommended_units = 0u64;

        for candidate in candidates {
            let Some(status) = candidate.status() else {
                continue;
            };
            *counts.entry(status).or_insert(0) += 1;
            if status.needs_reorder() {
                needs_reorder.push(candidate.product_id.clone());
            }
            if let Some(rec) = &candidate.recommendation {
                total_recommended_units =
                    total_recommended_units.saturating_add(rec.recommended_quantity);
            }
        }

        Self {
            report_date,
            total_products: candidates.len(),
            counts,
            failures,
            needs_reorder,
            total_recommended_units,
        }
    }

    pub fn count(&self, status: StockStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}
