use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use sentinel_velocity::batch::ProductFailure;
use sentinel_velocity::{ForecastConfig, VelocityResult};

use crate::candidate_pipeline::CandidatePipeline;
use crate::components::classification_log_side_effect::ClassificationLogSideEffect;
use crate::components::failed_product_filter::FailedProductFilter;
use crate::components::forecast_source::ForecastSource;
use crate::components::reorder_hydrator::ReorderHydrator;
use crate::components::report_date_query_hydrator::ReportDateQueryHydrator;
use crate::components::status_filter::StatusFilter;
use crate::components::urgency_scorer::UrgencyScorer;
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
use crate::summary::StockHealthSummary;
use crate::types::{ProductCandidate, ProductQuery};

#[derive(Clone, Debug, Serialize)]
pub struct ProductListResponse {
    pub request_id: String,
    pub report_date: Option<NaiveDate>,
    pub window_days: Option<i64>,
    /// Classified products, most urgent first.
    pub products: Vec<ProductCandidate>,
    /// Products that could not be classified.
    pub failures: Vec<ProductFailure>,
    pub summary: StockHealthSummary,
}

/// The product list view.
///
/// Pipeline flow:
/// 1. ReportDateQueryHydrator fills the report date and window
/// 2. ForecastSource classifies every requested product
/// 3. ReorderHydrator attaches reorder recommendations
/// 4. FailedProductFilter sets aside products that failed
/// 5. StatusFilter keeps the requested tiers (when asked)
/// 6. UrgencyScorer ranks by tier and days of stock
/// 7. UrgencySelector sorts and keeps the top K (when set)
/// 8. ClassificationLogSideEffect logs the tier breakdown
pub struct ProductListPipeline {
    config: ForecastConfig,
    query_hydrators: Vec<Box<dyn QueryHydrator<ProductQuery>>>,
    sources: Vec<Box<dyn Source<ProductQuery, ProductCandidate>>>,
    hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>>,
    filters: Vec<Box<dyn Filter<ProductQuery, ProductCandidate>>>,
    scorers: Vec<Box<dyn Scorer<ProductQuery, ProductCandidate>>>,
    selector: UrgencySelector,
    post_selection_hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>>,
    side_effects: Arc<Vec<Box<dyn SideEffect<ProductQuery, ProductCandidate>>>>,
    result_size: usize,
}

impl ProductListPipeline {
    pub fn new(snapshot: Arc<InventorySnapshot>, config: ForecastConfig) -> Self {
        Self::with_top_k(snapshot, config, None)
    }

    /// Keep only the `top_k` most urgent products when set.
    pub fn with_top_k(
        snapshot: Arc<InventorySnapshot>,
        config: ForecastConfig,
        top_k: Option<usize>,
    ) -> Self {
        Self::build(snapshot, config, top_k, None)
    }

    /// Pin the report date used when a query leaves it unset.
    pub fn with_today(
        snapshot: Arc<InventorySnapshot>,
        config: ForecastConfig,
        today: NaiveDate,
    ) -> Self {
        Self::build(snapshot, config, None, Some(today))
    }

    fn build(
        snapshot: Arc<InventorySnapshot>,
        config: ForecastConfig,
        top_k: Option<usize>,
        today: Option<NaiveDate>,
    ) -> Self {
        let query_hydrators: Vec<Box<dyn QueryHydrator<ProductQuery>>> =
            vec![Box::new(ReportDateQueryHydrator {
                default_window_days: config.window_days,
                today,
            })];

        let sources: Vec<Box<dyn Source<ProductQuery, ProductCandidate>>> = vec![Box::new(
            ForecastSource::new(snapshot, config.apply_demand_events),
        )];

        let hydrators: Vec<Box<dyn Hydrator<ProductQuery, ProductCandidate>>> =
            vec![Box::new(ReorderHydrator::new(
                config.default_lead_time_days,
                config.reorder_policy(),
            ))];

        let filters: Vec<Box<dyn Filter<ProductQuery, ProductCandidate>>> =
            vec![Box::new(FailedProductFilter), Box::new(StatusFilter)];

        let scorers: Vec<Box<dyn Scorer<ProductQuery, ProductCandidate>>> =
            vec![Box::new(UrgencyScorer)];

        let side_effects: Arc<Vec<Box<dyn SideEffect<ProductQuery, ProductCandidate>>>> =
            Arc::new(vec![Box::new(ClassificationLogSideEffect)]);

        Self {
            config,
            query_hydrators,
            sources,
            hydrators,
            filters,
            scorers,
            selector: UrgencySelector { k: top_k },
            post_selection_hydrators: Vec::new(),
            side_effects,
            result_size: top_k.unwrap_or(usize::MAX),
        }
    }

    /// Classify the requested products (or the whole catalog).
    ///
    /// Fails only for an invalid window; per-product problems are reported
    /// in `failures`.
    pub async fn list(&self, query: ProductQuery) -> VelocityResult<ProductListResponse> {
        check_window(query.window_days.unwrap_or(self.config.window_days))?;

        let result = self.execute(query).await;

        let failures: Vec<ProductFailure> = result
            .filtered_candidates
            .into_iter()
            .filter_map(|c| {
                c.error.map(|error| ProductFailure {
                    product_id: c.product_id,
                    error,
                })
            })
            .collect();

        let summary = StockHealthSummary::from_candidates(
            result.query.report_date,
            &result.selected_candidates,
            failures.len(),
        );

        Ok(ProductListResponse {
            request_id: result.query.request_id.clone(),
            report_date: result.query.report_date,
            window_days: result.query.window_days,
            products: result.selected_candidates,
            failures,
            summary,
        })
    }
}

#[async_trait]
impl CandidatePipeline<ProductQuery, ProductCandidate> for ProductListPipeline {
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
        self.result_size
    }
}
