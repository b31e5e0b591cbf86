//! Sales history aggregation.
//!
//! Turns per-day sales rows into a `VelocityProfile` per product. Only
//! complete days count: the window is `[today - window_days, today - 1]`,
//! so a partially elapsed `today` never understates velocity.
//!
//! Velocity always divides by the nominal window length. A product that
//! sold on 5 of 30 days is averaged over 30 days, not 5.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::error::{VelocityError, VelocityResult};
use crate::types::{DailySalesRecord, VelocityProfile};

/// Inclusive bounds of the complete-day window ending yesterday.
///
/// A window reaching before the earliest representable date is invalid.
pub fn window_bounds(window_days: i64, today: NaiveDate) -> VelocityResult<(NaiveDate, NaiveDate)> {
    let invalid = || VelocityError::InvalidWindow { window_days };
    let length = u64::try_from(window_days)
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(invalid)?;
    let start = today.checked_sub_days(Days::new(length)).ok_or_else(invalid)?;
    let end = today.checked_sub_days(Days::new(1)).ok_or_else(invalid)?;
    Ok((start, end))
}

/// Aggregate one product's sales over the window.
///
/// Rows for other products are ignored, so the full snapshot can be
/// passed. A product with no rows yields zero velocity.
pub fn aggregate(
    records: &[DailySalesRecord],
    product_id: &str,
    window_days: i64,
    today: NaiveDate,
) -> VelocityResult<VelocityProfile> {
    let (start, end) = window_bounds(window_days, today)?;

    let total: u64 = records
        .iter()
        .filter(|r| r.product_id == product_id && r.date >= start && r.date <= end)
        .fold(0u64, |total, r| total.saturating_add(r.quantity_sold));

    Ok(profile(product_id, total, window_days))
}

/// Aggregate every product that appears in `records`.
///
/// Single pass over the rows; products are keyed in sorted order.
pub fn aggregate_all(
    records: &[DailySalesRecord],
    window_days: i64,
    today: NaiveDate,
) -> VelocityResult<BTreeMap<String, VelocityProfile>> {
    let (start, end) = window_bounds(window_days, today)?;

    let mut totals: BTreeMap<&str, u64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.product_id.as_str()).or_insert(0);
        if record.date >= start && record.date <= end {
            *total = total.saturating_add(record.quantity_sold);
        }
    }

    Ok(totals
        .into_iter()
        .map(|(product_id, total)| (product_id.to_string(), profile(product_id, total, window_days)))
        .collect())
}

fn profile(product_id: &str, total: u64, window_days: i64) -> VelocityProfile {
    VelocityProfile {
        product_id: product_id.to_string(),
        total_units_sold_in_window: total,
        window_days,
        daily_velocity: total as f64 / window_days as f64,
    }
}
