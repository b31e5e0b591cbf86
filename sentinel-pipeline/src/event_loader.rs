//! CSV loader for the demand event log.
//!
//! Matches the event log export:
//!   name, source, start_date, end_date, multiplier, affected_brand,
//!   affected_barcodes
//! with optional `id`, `affected_category` and `is_active` columns.
//! `affected_barcodes` is a `|`-separated product id list. Rows without an
//! id get `event-<line>`; rows without `is_active` are active.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use sentinel_velocity::types::{DemandEvent, EventSource};

use crate::error::{LoadError, LoadResult};
use crate::inventory_loader::{csv_reader, open};

#[derive(Debug, Clone, Deserialize)]
struct EventRecord {
    #[serde(default)]
    id: Option<String>,
    name: String,
    source: EventSource,
    start_date: NaiveDate,
    end_date: NaiveDate,
    multiplier: f64,
    #[serde(default)]
    affected_brand: Option<String>,
    #[serde(default)]
    affected_category: Option<String>,
    #[serde(default)]
    affected_barcodes: Option<String>,
    #[serde(default = "default_active", deserialize_with = "deserialize_bool")]
    is_active: bool,
}

fn default_active() -> bool {
    true
}

impl EventRecord {
    fn into_event(self, line: usize) -> LoadResult<DemandEvent> {
        if self.end_date < self.start_date {
            return Err(LoadError::InvalidRecord {
                line,
                reason: format!(
                    "event '{}' ends ({}) before it starts ({})",
                    self.name, self.end_date, self.start_date
                ),
            });
        }
        if !self.multiplier.is_finite() || self.multiplier < 1.0 {
            return Err(LoadError::InvalidRecord {
                line,
                reason: format!(
                    "event '{}' has multiplier {} (must be >= 1.0)",
                    self.name, self.multiplier
                ),
            });
        }

        let affected_product_ids = self
            .affected_barcodes
            .as_deref()
            .unwrap_or("")
            .split('|')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();

        Ok(DemandEvent {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| format!("event-{}", line)),
            name: self.name,
            source: self.source,
            start_date: self.start_date,
            end_date: self.end_date,
            multiplier: self.multiplier,
            affected_product_ids,
            affected_brand: self.affected_brand,
            affected_category: self.affected_category,
            is_active: self.is_active,
        })
    }
}

pub fn load_events<R: Read>(reader: R) -> LoadResult<Vec<DemandEvent>> {
    let mut csv_reader = csv_reader(reader);
    let mut events = Vec::new();

    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let line = line_num + 2;
        let record: EventRecord = result.map_err(|source| LoadError::Csv { line, source })?;
        events.push(record.into_event(line)?);
    }

    log::debug!(
        "loaded {} demand events ({} active)",
        events.len(),
        events.iter().filter(|e| e.is_active).count()
    );
    Ok(events)
}

pub fn load_events_file(path: impl AsRef<Path>) -> LoadResult<Vec<DemandEvent>> {
    load_events(open(path.as_ref())?)
}

/// Flexible bool deserializer: handles "true"/"false", "1"/"0", "yes"/"no".
/// An empty field means active.
fn deserialize_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.to_lowercase().trim() {
        "true" | "1" | "yes" | "y" | "" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected bool value, got '{}'",
            other
        ))),
    }
}
