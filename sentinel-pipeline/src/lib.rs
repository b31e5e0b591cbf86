//! Call sites for the velocity core.
//!
//! Both views run the same staged candidate pipeline over one shared
//! `InventorySnapshot`:
//! - `ProductListPipeline`: every product, sorted by urgency
//! - `ProductAnalyticsPipeline`: one product with its reorder recommendation

pub mod candidate_pipeline;
pub mod components;
pub mod error;
pub mod event_loader;
pub mod filter;
pub mod hydrator;
pub mod inventory_loader;
pub mod pipelines;
pub mod query_hydrator;
pub mod scorer;
pub mod selector;
pub mod side_effect;
pub mod snapshot;
pub mod source;
pub mod summary;
pub mod types;
pub mod util;

pub use candidate_pipeline::{CandidatePipeline, PipelineResult};
pub use error::{LoadError, LoadResult};
pub use pipelines::product_analytics::{ProductAnalysis, ProductAnalyticsPipeline};
pub use pipelines::product_list::{ProductListPipeline, ProductListResponse};
pub use snapshot::InventorySnapshot;
pub use summary::StockHealthSummary;
pub use types::{ProductCandidate, ProductQuery};
