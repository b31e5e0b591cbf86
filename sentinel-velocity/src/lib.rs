//! Inventory velocity core.
//!
//! Pure, synchronous computation over a read-only snapshot:
//! - `aggregator`: daily sales rows -> average daily velocity
//! - `stock`: physical / allocated / available stock and legacy status
//! - `classifier`: days of stock and urgency tier (shared by every caller)
//! - `adjuster`: demand event multipliers
//! - `reorder`: reorder quantity and narrative status
//! - `batch`: parallel per-product classification with per-product failures

pub mod adjuster;
pub mod aggregator;
pub mod batch;
pub mod classifier;
pub mod config;
pub mod error;
pub mod reorder;
pub mod stock;
pub mod thresholds;
pub mod types;

pub use adjuster::{adjust, adjust_detailed, DemandAdjustment};
pub use aggregator::{aggregate, aggregate_all};
pub use batch::{classify_batch, BatchOutcome, ProductFailure};
pub use classifier::{classify, classify_position, classify_with_velocity};
pub use config::{ConfigError, ForecastConfig};
pub use error::{VelocityError, VelocityResult};
pub use reorder::{recommend, ReorderPolicy};
pub use stock::{resolve, ResolvedStock};
pub use types::{
    Classification, ClassificationResult, DailySalesRecord, DemandEvent, EventSource,
    LegacyStockStatus, ProductAttributes, ReorderRecommendation, Severity, StockPosition,
    StockStatus, VelocityProfile,
};
