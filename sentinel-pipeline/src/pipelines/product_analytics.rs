use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use sentinel_velocity::adjuster::DemandAdjustment;
use sentinel_velocity::stock::ResolvedStock;
use sentinel_velocity::types::{ClassificationResult, ReorderRecommendation, VelocityProfile};
use sentinel_velocity::{ForecastConfig, VelocityError, VelocityResult};

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::failed_product_filter::FailedProductFilter;
use crate::components::forecast_source::ForecastSource;
use crate::components::reorder_hydrator::ReorderHydrator;
use crate::components::report_date_query_hydrator::ReportDateQueryHydrator;
use crate::components::urgency_selector::UrgencySelector;
use crate::filter::Filter;
use crate::hydrator::Hydrator;
use crate::pipelines::check_window;
use crate::query_hydrator::QueryHydrator;
use crate::scorer::Scorer;
use crate::selector::Selector;
use crate::side_effect::SideEffect;
use crate::snapshot::InventorySnapshot;
use crate::source::Source;
use crate::types::{ProductCandidate, ProductQuery};

/// Everything the analytics view shows for one product.
#[derive(Clone, Debug, Serialize)]
pub struct ProductAnalysis {
    pub product_id: String,
    pub name: String,
    pub report_date: Option<NaiveDate>,
    pub profile: VelocityProfile,
    pub resolved: ResolvedStock,
    /// Present when demand events are applied, even if none matched.
    pub adjustment: Option<DemandAdjustment>,
    pub classification: ClassificationResult,
    pub recommendation: ReorderRecommendation,
}

impl ProductAnalysis {
    fn from_candidate(
        candidate: ProductCandidate,
        report_date: Option<NaiveDate>,
    ) -> VelocityResult<Self> {
        let missing = VelocityError::MissingProduct(candidate.product_id.clone());
        let ProductCandidate {
            product_id,
            name,
            profile: Some(profile),
            resolved: Some(resolved),
            adjustment,
            classification: Some(classification),
            recommendation: Some(recommendation),
            ..
        } = candidate
        else {
            return Err(missing);
        };

        Ok(Self {
            product_id,
            name,
            report_date,
            profile,
            resolved,
            adjustment,
            classification,
            recommendation,
        })
    }
}

/// The single-product analytics view.
///
/// Same source and classifier as the list view, so both agree on a
/// product's tier. The reorder recommendation is always attached.
pub struct ProductAnalyticsPipeline {
    config: ForecastConfig,
    query_hydrators: Vec<Box<dyn QueryHydrator<ProductQuery>>>,
    sources: Vec<Box<dyn Source<ProductQuery, ProductCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>>,
    filters: Vec<Box<dyn Filter<ProductQuery, ProductCandidate>>>,
    scorers: Vec<Box<dyn Scorer<ProductQuery, ProductCandidate>>>,
    selector: UrgencySelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<ProductQuery, ProductCandidate>>>>,
}

impl ProductAnalyticsPipeline {
    pub fn new(snapshot: Arc<InventorySnapshot>, config: ForecastConfig) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<ProductQuery>>> =
            vec![Box::new(ReportDateQueryHydrator::new(config.window_days))];

        let sources: Vec<Box<dyn Source<ProductQuery, ProductCandidate>>> = vec![Box::new(
            ForecastSource::new(snapshot, config.apply_demand_events),
        )];

        let hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>> =
            vec![Box::new(ReorderHydrator::new(
                config.default_lead_time_days,
                config.reorder_policy(),
            ))];

        let filters: Vec<Box<dyn Filter<ProductQuery, ProductCandidate>>> =
            vec![Box::new(FailedProductFilter)];

        Self {
            config,
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers: Vec::new(),
            selector: UrgencySelector::top(1),
            post_selection_hydrators: Vec::new(),
            side_effects: Arc::new(Vec::new()),
        }
    }

    /// Analyze one product as of `report_date` (the current UTC day when
    /// `None`).
    pub async fn analyze(
        &self,
        product_id: &str,
        report_date: Option<NaiveDate>,
    ) -> VelocityResult<ProductAnalysis> {
        check_window(self.config.window_days)?;

        let query = ProductQuery {
            report_date,
            ..ProductQuery::for_products(format!("analytics-{}", product_id), [product_id])
        };
        let result = self.execute(query).await;
        let report_date = result.query.report_date;

        if let Some(candidate) = result.selected_candidates.into_iter().next() {
            return ProductAnalysis::from_candidate(candidate, report_date);
        }

        let error = result
            .filtered_candidates
            .into_iter()
            .find_map(|c| c.error)
            .unwrap_or_else(|| VelocityError::MissingProduct(product_id.to_string()));
        Err(error)
    }
}

#[async_trait]
impl CandidatePipeline<ProductQuery, ProductCandidate> for ProductAnalyticsPipeline {
    fn query_hydrators(&self) -> &[Box<dyn QueryHydrator<ProductQuery>>] {
        &self.query_hydrators
    }

    fn sources(&self) -> &[Box<dyn Source<ProductQuery, ProductCandidate>>] {
        &self.sources
    }

    fn hydrators(&self) -> &[Box<dyn Hydrator<ProductQuery, ProductCandidate>>] {
        &self.hydrators
    }

    fn filters(&self) -> &[Box<dyn Filter<ProductQuery, ProductCandidate>>] {
        &self.filters
    }

    fn scorers(&self) -> &[Box<dyn Scorer<ProductQuery, ProductCandidate>>] {
        &self.scorers
    }

    fn selector(&self) -> &dyn Selector<ProductQuery, ProductCandidate> {
        &self.selector
    }

    fn post_selection_hydrators(&self) -> &[Box<dyn Hydrator<ProductQuery, ProductCandidate>>] {
        &self.post_selection_hydrators
    }

    fn side_effects(&self) -> Arc<Vec<Box<dyn SideEffect<ProductQuery, ProductCandidate>>>> {
        Arc::clone(&self.side_effects)
    }

    fn result_size(&self) -> usize {
        1
    }
}
