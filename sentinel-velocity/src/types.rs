use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::thresholds::DEFAULT_REORDER_LEVEL;

// ---------------------------------------------------------------------------
// Input snapshots
// ---------------------------------------------------------------------------

/// Units of one product sold on one closed calendar day (UTC).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySalesRecord {
    pub product_id: String,
    pub date: NaiveDate,
    pub quantity_sold: u64,
}

/// Physical and reserved stock for a product at snapshot time.
///
/// Fields are signed so that corrupt upstream values can be detected and
/// rejected instead of wrapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockPosition {
    pub product_id: String,
    /// Physical units on hand.
    pub current_stock: i64,
    /// Units reserved by pending or preparing orders.
    pub allocated_stock: i64,
    #[serde(default = "default_reorder_level")]
    pub reorder_level: i64,
}

fn default_reorder_level() -> i64 {
    DEFAULT_REORDER_LEVEL
}

impl StockPosition {
    pub fn new(product_id: impl Into<String>, current_stock: i64, allocated_stock: i64) -> Self {
        Self {
            product_id: product_id.into(),
            current_stock,
            allocated_stock,
            reorder_level: DEFAULT_REORDER_LEVEL,
        }
    }
}

/// Attributes used to decide whether a demand event covers a product.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub product_id: String,
    pub brand: Option<String>,
    pub category: Option<String>,
}

// ---------------------------------------------------------------------------
// Derived values
// ---------------------------------------------------------------------------

/// Average daily sales over a lookback window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocityProfile {
    pub product_id: String,
    pub total_units_sold_in_window: u64,
    pub window_days: i64,
    /// Unrounded; only `display_velocity` rounds.
    pub daily_velocity: f64,
}

impl VelocityProfile {
    /// Velocity rounded to one decimal place for display.
    pub fn display_velocity(&self) -> f64 {
        (self.daily_velocity * 10.0).round() / 10.0
    }
}

/// Urgency tier for a product's stock position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockStatus {
    OutOfStock,
    Critical,
    Low,
    DeadStock,
    Healthy,
}

impl StockStatus {
    pub const ALL: [StockStatus; 5] = [
        StockStatus::OutOfStock,
        StockStatus::Critical,
        StockStatus::Low,
        StockStatus::DeadStock,
        StockStatus::Healthy,
    ];

    pub fn severity(self) -> Severity {
        match self {
            StockStatus::OutOfStock | StockStatus::Critical => Severity::Urgent,
            StockStatus::Low => Severity::Warning,
            StockStatus::DeadStock => Severity::Review,
            StockStatus::Healthy => Severity::Ok,
        }
    }

    /// Whether the status should surface in reorder alerts.
    pub fn needs_reorder(self) -> bool {
        matches!(
            self,
            StockStatus::OutOfStock | StockStatus::Critical | StockStatus::Low
        )
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
            StockStatus::Critical => write!(f, "CRITICAL"),
            StockStatus::Low => write!(f, "LOW"),
            StockStatus::DeadStock => write!(f, "DEAD_STOCK"),
            StockStatus::Healthy => write!(f, "HEALTHY"),
        }
    }
}

/// Severity tier a status maps to for alerting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Urgent,
    Warning,
    Review,
    Ok,
}

/// Threshold-only stock state shown by older list views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LegacyStockStatus {
    OutOfStock,
    LowStock,
    InStock,
}

impl fmt::Display for LegacyStockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LegacyStockStatus::OutOfStock => write!(f, "OUT_OF_STOCK"),
            LegacyStockStatus::LowStock => write!(f, "LOW_STOCK"),
            LegacyStockStatus::InStock => write!(f, "IN_STOCK"),
        }
    }
}

/// Days of stock and status for a (stock, velocity) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub days_of_stock: u64,
    pub status: StockStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub product_id: String,
    pub days_of_stock: u64,
    pub status: StockStatus,
}

impl ClassificationResult {
    pub fn classification(&self) -> Classification {
        Classification {
            days_of_stock: self.days_of_stock,
            status: self.status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    pub product_id: String,
    pub recommended_quantity: u64,
    /// Units expected to sell over lead time plus safety buffer.
    pub forecasted_need: u64,
    pub lead_time_days: u32,
    pub safety_buffer_days: u32,
    pub narrative_status: String,
    pub severity: Severity,
}

// ---------------------------------------------------------------------------
// Demand events
// ---------------------------------------------------------------------------

/// Who raised a demand event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSource {
    StoreDiscount,
    ManufacturerCampaign,
    Holiday,
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventSource::StoreDiscount => write!(f, "STORE_DISCOUNT"),
            EventSource::ManufacturerCampaign => write!(f, "MANUFACTURER_CAMPAIGN"),
            EventSource::Holiday => write!(f, "HOLIDAY"),
        }
    }
}

/// A time-bounded occurrence that multiplies expected demand.
///
/// Events are soft-deactivated through `is_active`, never deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemandEvent {
    pub id: String,
    pub name: String,
    pub source: EventSource,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub multiplier: f64,
    #[serde(default)]
    pub affected_product_ids: Vec<String>,
    #[serde(default)]
    pub affected_brand: Option<String>,
    #[serde(default)]
    pub affected_category: Option<String>,
    pub is_active: bool,
}

impl DemandEvent {
    /// True when the event names no products, brand or category and so
    /// applies store-wide (holidays).
    pub fn is_unscoped(&self) -> bool {
        self.affected_product_ids.is_empty()
            && is_blank(&self.affected_brand)
            && is_blank(&self.affected_category)
    }

    pub fn is_running_on(&self, day: NaiveDate) -> bool {
        self.is_active && self.start_date <= day && day <= self.end_date
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}
