use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rayon::prelude::*;

use sentinel_velocity::adjuster::adjust_detailed;
use sentinel_velocity::aggregator::{aggregate, aggregate_all};
use sentinel_velocity::classifier::classify_with_velocity;
use sentinel_velocity::stock;
use sentinel_velocity::types::VelocityProfile;
use sentinel_velocity::{VelocityError, VelocityResult};

use crate::inventory_loader::CatalogEntry;
use crate::snapshot::InventorySnapshot;
use crate::source::Source;
use crate::types::{ProductCandidate, ProductQuery};

/// Source that evaluates products against the shared snapshot.
///
/// For each requested product (or the whole catalog):
/// 1. Resolves available stock and legacy status
/// 2. Looks up the velocity profile aggregated once for the request
/// 3. Optionally scales velocity by active demand events
/// 4. Classifies through the shared velocity classifier
///
/// Products fan out across Rayon workers and come back in request order.
/// A product that cannot be evaluated is returned with its error set.
pub struct ForecastSource {
    snapshot: Arc<InventorySnapshot>,
    apply_demand_events: bool,
}

impl ForecastSource {
    pub fn new(snapshot: Arc<InventorySnapshot>, apply_demand_events: bool) -> Self {
        Self {
            snapshot,
            apply_demand_events,
        }
    }

    fn evaluate(
        &self,
        product_id: &str,
        profiles: &BTreeMap<String, VelocityProfile>,
        window_days: i64,
        today: NaiveDate,
    ) -> ProductCandidate {
        let Some(entry) = self.snapshot.entry(product_id) else {
            return ProductCandidate::failed(
                product_id,
                VelocityError::MissingProduct(product_id.to_string()),
            );
        };

        let mut candidate = ProductCandidate {
            product_id: product_id.to_string(),
            name: entry.name.clone(),
            brand: entry.brand.clone(),
            category: entry.category.clone(),
            position: Some(entry.position.clone()),
            lead_time_days: entry.lead_time_days,
            ..ProductCandidate::default()
        };

        if let Err(error) = self.classify_into(&mut candidate, entry, profiles, window_days, today) {
            log::debug!("product {} not classified: {}", product_id, error);
            candidate.error = Some(error);
        }
        candidate
    }

    fn classify_into(
        &self,
        candidate: &mut ProductCandidate,
        entry: &CatalogEntry,
        profiles: &BTreeMap<String, VelocityProfile>,
        window_days: i64,
        today: NaiveDate,
    ) -> VelocityResult<()> {
        let resolved = stock::resolve(&entry.position)?;

        // Products without any sales rows still get a zero-velocity profile.
        let profile = match profiles.get(&candidate.product_id) {
            Some(profile) => profile.clone(),
            None => aggregate(&[], &candidate.product_id, window_days, today)?,
        };

        let velocity = if self.apply_demand_events {
            let adjustment = adjust_detailed(
                profile.daily_velocity,
                &candidate.attributes(),
                &self.snapshot.events,
                today,
            );
            let adjusted = adjustment.adjusted_velocity;
            candidate.adjustment = Some(adjustment);
            adjusted
        } else {
            profile.daily_velocity
        };

        let classification = classify_with_velocity(&entry.position, velocity)?;

        candidate.resolved = Some(resolved);
        candidate.profile = Some(profile);
        candidate.classification = Some(classification);
        Ok(())
    }
}

#[async_trait]
impl Source<ProductQuery, ProductCandidate> for ForecastSource {
    fn enable(&self, query: &ProductQuery) -> bool {
        !self.snapshot.is_empty() || !query.product_ids.is_empty()
    }

    async fn get_candidates(&self, query: &ProductQuery) -> Result<Vec<ProductCandidate>, String> {
        let today = query
            .report_date
            .ok_or_else(|| "report date was not resolved".to_string())?;
        let window_days = query
            .window_days
            .ok_or_else(|| "window length was not resolved".to_string())?;

        let profiles =
            aggregate_all(&self.snapshot.sales, window_days, today).map_err(|e| e.to_string())?;

        let product_ids = if query.product_ids.is_empty() {
            self.snapshot.product_ids()
        } else {
            query.product_ids.clone()
        };

        let candidates: Vec<ProductCandidate> = product_ids
            .par_iter()
            .map(|id| self.evaluate(id, &profiles, window_days, today))
            .collect();

        Ok(candidates)
    }
}
