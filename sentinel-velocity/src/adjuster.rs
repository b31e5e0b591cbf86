//! Demand event adjustment.
//!
//! Scales a baseline velocity by every event that is active, running on
//! `today` and scoped to the product. Matching multipliers compound: a 2x
//! holiday during a 1.5x campaign forecasts 3x demand.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{DemandEvent, ProductAttributes};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DemandAdjustment {
    pub baseline_velocity: f64,
    pub combined_multiplier: f64,
    pub adjusted_velocity: f64,
    /// Ids of the events that contributed, in input order.
    pub applied_event_ids: Vec<String>,
}

impl DemandAdjustment {
    pub fn is_adjusted(&self) -> bool {
        !self.applied_event_ids.is_empty()
    }
}

/// Whether the event's scope covers the product.
///
/// Scope is any of: an explicit product id, a case-insensitive brand
/// substring, or a case-insensitive category. An event naming none of
/// these is store-wide.
pub fn event_covers(event: &DemandEvent, product: &ProductAttributes) -> bool {
    if event.is_unscoped() {
        return true;
    }

    if event
        .affected_product_ids
        .iter()
        .any(|id| id == &product.product_id)
    {
        return true;
    }

    if let (Some(wanted), Some(brand)) = (non_blank(&event.affected_brand), &product.brand) {
        if brand.to_lowercase().contains(&wanted.to_lowercase()) {
            return true;
        }
    }

    if let (Some(wanted), Some(category)) =
        (non_blank(&event.affected_category), &product.category)
    {
        if category.trim().eq_ignore_ascii_case(wanted) {
            return true;
        }
    }

    false
}

/// Events that apply to `product` on `today`, skipping malformed multipliers.
pub fn matching_events<'a>(
    product: &'a ProductAttributes,
    events: &'a [DemandEvent],
    today: NaiveDate,
) -> impl Iterator<Item = &'a DemandEvent> + 'a {
    events.iter().filter(move |event| {
        if !event.is_running_on(today) || !event_covers(event, product) {
            return false;
        }
        if !event.multiplier.is_finite() || event.multiplier < 1.0 {
            log::warn!(
                "skipping event {} with invalid multiplier {}",
                event.id,
                event.multiplier
            );
            return false;
        }
        true
    })
}

pub fn adjust_detailed(
    baseline_velocity: f64,
    product: &ProductAttributes,
    events: &[DemandEvent],
    today: NaiveDate,
) -> DemandAdjustment {
    let mut combined_multiplier = 1.0;
    let mut applied_event_ids = Vec::new();

    for event in matching_events(product, events, today) {
        combined_multiplier *= event.multiplier;
        applied_event_ids.push(event.id.clone());
    }

    if !applied_event_ids.is_empty() {
        log::debug!(
            "product {} demand x{:.2} from events {:?}",
            product.product_id,
            combined_multiplier,
            applied_event_ids
        );
    }

    DemandAdjustment {
        baseline_velocity,
        combined_multiplier,
        adjusted_velocity: baseline_velocity * combined_multiplier,
        applied_event_ids,
    }
}

/// Adjusted velocity only. Returns the baseline unchanged when nothing matches.
pub fn adjust(
    baseline_velocity: f64,
    product: &ProductAttributes,
    events: &[DemandEvent],
    today: NaiveDate,
) -> f64 {
    adjust_detailed(baseline_velocity, product, events, today).adjusted_velocity
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
