//! CSV loaders for inventory positions and daily sales aggregates.
//!
//! Inventory columns:
//!   product_id, name, brand, category, current_stock, allocated_stock,
//!   reorder_level, lead_time_days
//! (`name`, `brand`, `category`, `reorder_level`, `lead_time_days` may be
//! empty or absent.)
//!
//! Daily sales columns:
//!   product_id, date (YYYY-MM-DD), quantity_sold

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use sentinel_velocity::types::{DailySalesRecord, StockPosition};

use crate::error::{LoadError, LoadResult};

/// An inventory CSV row.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryRecord {
    pub product_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub current_stock: i64,
    pub allocated_stock: i64,
    #[serde(default)]
    pub reorder_level: Option<i64>,
    #[serde(default)]
    pub lead_time_days: Option<u32>,
}

/// A product's catalog metadata together with its stock snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub position: StockPosition,
    pub lead_time_days: Option<u32>,
}

impl InventoryRecord {
    /// Convert to a catalog entry, filling a missing reorder level.
    ///
    /// Stock figures are carried as-is; negative values are rejected later
    /// by the velocity core so they surface per product.
    pub fn into_entry(self, default_reorder_level: i64) -> CatalogEntry {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.product_id.clone());
        CatalogEntry {
            name,
            brand: self.brand.filter(|b| !b.trim().is_empty()),
            category: self.category.filter(|c| !c.trim().is_empty()),
            position: StockPosition {
                product_id: self.product_id,
                current_stock: self.current_stock,
                allocated_stock: self.allocated_stock,
                reorder_level: self.reorder_level.unwrap_or(default_reorder_level),
            },
            lead_time_days: self.lead_time_days,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct SalesRecord {
    product_id: String,
    date: NaiveDate,
    quantity_sold: u64,
}

pub(crate) fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub(crate) fn open(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load inventory rows. Product ids must be unique.
pub fn load_inventory<R: Read>(reader: R) -> LoadResult<Vec<InventoryRecord>> {
    let mut csv_reader = csv_reader(reader);
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let line = line_num + 2;
        let record: InventoryRecord = result.map_err(|source| LoadError::Csv { line, source })?;
        if record.product_id.is_empty() {
            return Err(LoadError::InvalidRecord {
                line,
                reason: "empty product_id".into(),
            });
        }
        if !seen.insert(record.product_id.clone()) {
            return Err(LoadError::DuplicateProduct(record.product_id));
        }
        records.push(record);
    }

    log::debug!("loaded {} inventory rows", records.len());
    Ok(records)
}

pub fn load_inventory_file(path: impl AsRef<Path>) -> LoadResult<Vec<InventoryRecord>> {
    load_inventory(open(path.as_ref())?)
}

/// Load daily sales aggregates. `(product_id, date)` must be unique.
pub fn load_daily_sales<R: Read>(reader: R) -> LoadResult<Vec<DailySalesRecord>> {
    let mut csv_reader = csv_reader(reader);
    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let line = line_num + 2;
        let row: SalesRecord = result.map_err(|source| LoadError::Csv { line, source })?;
        if !seen.insert((row.product_id.clone(), row.date)) {
            return Err(LoadError::DuplicateSalesRow {
                product_id: row.product_id,
                date: row.date.to_string(),
            });
        }
        records.push(DailySalesRecord {
            product_id: row.product_id,
            date: row.date,
            quantity_sold: row.quantity_sold,
        });
    }

    log::debug!("loaded {} daily sales rows", records.len());
    Ok(records)
}

pub fn load_daily_sales_file(path: impl AsRef<Path>) -> LoadResult<Vec<DailySalesRecord>> {
    load_daily_sales(open(path.as_ref())?)
}
