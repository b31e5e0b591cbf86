//! The read-only inventory snapshot shared by one invocation.
//!
//! Loaded once (batch query or CSV export), wrapped in an `Arc`, and
//! fanned out to per-product evaluation. Nothing mutates it afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use sentinel_velocity::types::{DailySalesRecord, DemandEvent};

use crate::error::{LoadError, LoadResult};
use crate::event_loader::load_events_file;
use crate::inventory_loader::{
    load_daily_sales_file, load_inventory_file, CatalogEntry, InventoryRecord,
};

#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    /// Catalog entries keyed by product id.
    pub catalog: BTreeMap<String, CatalogEntry>,
    pub sales: Vec<DailySalesRecord>,
    pub events: Vec<DemandEvent>,
}

impl InventorySnapshot {
    pub fn new(
        inventory: Vec<InventoryRecord>,
        sales: Vec<DailySalesRecord>,
        events: Vec<DemandEvent>,
        default_reorder_level: i64,
    ) -> LoadResult<Self> {
        let mut catalog = BTreeMap::new();
        for record in inventory {
            let product_id = record.product_id.clone();
            if catalog
                .insert(product_id.clone(), record.into_entry(default_reorder_level))
                .is_some()
            {
                return Err(LoadError::DuplicateProduct(product_id));
            }
        }
        Ok(Self {
            catalog,
            sales,
            events,
        })
    }

    /// Load inventory, sales and (optionally) events from CSV exports.
    pub fn from_csv_files(
        inventory_path: impl AsRef<Path>,
        sales_path: impl AsRef<Path>,
        events_path: Option<&Path>,
        default_reorder_level: i64,
    ) -> LoadResult<Self> {
        let inventory = load_inventory_file(inventory_path)?;
        let sales = load_daily_sales_file(sales_path)?;
        let events = match events_path {
            Some(path) => load_events_file(path)?,
            None => Vec::new(),
        };
        let snapshot = Self::new(inventory, sales, events, default_reorder_level)?;
        log::info!(
            "snapshot loaded: {} products, {} sales rows, {} events",
            snapshot.catalog.len(),
            snapshot.sales.len(),
            snapshot.events.len()
        );
        Ok(snapshot)
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    pub fn entry(&self, product_id: &str) -> Option<&CatalogEntry> {
        self.catalog.get(product_id)
    }

    pub fn product_ids(&self) -> Vec<String> {
        self.catalog.keys().cloned().collect()
    }
}
