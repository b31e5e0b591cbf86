use chrono::NaiveDate;
use serde::Serialize;

use sentinel_velocity::adjuster::DemandAdjustment;
use sentinel_velocity::stock::ResolvedStock;
use sentinel_velocity::types::{
    ClassificationResult, ProductAttributes, ReorderRecommendation, StockPosition, StockStatus,
    VelocityProfile,
};
use sentinel_velocity::VelocityError;

/// Anything carrying a request id for log correlation.
pub trait HasRequestId {
    fn request_id(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// A request to classify products against the current snapshot.
#[derive(Clone, Debug, Default)]
pub struct ProductQuery {
    pub request_id: String,
    /// Products to evaluate. Empty means the whole catalog.
    pub product_ids: Vec<String>,
    /// Day the report is for. Filled with the current UTC day when absent.
    pub report_date: Option<NaiveDate>,
    /// Sales lookback window. Filled from config when absent.
    pub window_days: Option<i64>,
    /// Only return products in these tiers.
    pub status_filter: Option<Vec<StockStatus>>,
}

impl ProductQuery {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }

    pub fn for_products<I, S>(request_id: impl Into<String>, product_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            request_id: request_id.into(),
            product_ids: product_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl HasRequestId for ProductQuery {
    fn request_id(&self) -> &str {
        &self.request_id
    }
}

// ---------------------------------------------------------------------------
// Candidate types
// ---------------------------------------------------------------------------

/// One product moving through a pipeline.
///
/// The source fills the snapshot and classification fields; hydrators and
/// scorers fill the rest. A product that could not be evaluated keeps its
/// `error` and is removed by `FailedProductFilter`.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ProductCandidate {
    pub product_id: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub position: Option<StockPosition>,
    /// Supplier lead time on file, if any.
    pub lead_time_days: Option<u32>,

    pub profile: Option<VelocityProfile>,
    pub resolved: Option<ResolvedStock>,
    pub adjustment: Option<DemandAdjustment>,
    pub classification: Option<ClassificationResult>,

    // Populated by hydrators and scorers
    pub recommendation: Option<ReorderRecommendation>,
    pub urgency_score: Option<f64>,

    #[serde(skip)]
    pub error: Option<VelocityError>,
}

impl ProductCandidate {
    pub fn failed(product_id: impl Into<String>, error: VelocityError) -> Self {
        Self {
            product_id: product_id.into(),
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn attributes(&self) -> ProductAttributes {
        ProductAttributes {
            product_id: self.product_id.clone(),
            brand: self.brand.clone(),
            category: self.category.clone(),
        }
    }

    /// Velocity the classification was computed from: event-adjusted when
    /// an adjustment was applied, otherwise the window average.
    pub fn effective_velocity(&self) -> Option<f64> {
        match (&self.adjustment, &self.profile) {
            (Some(adjustment), _) => Some(adjustment.adjusted_velocity),
            (None, Some(profile)) => Some(profile.daily_velocity),
            (None, None) => None,
        }
    }

    pub fn status(&self) -> Option<StockStatus> {
        self.classification.as_ref().map(|c| c.status)
    }
}
