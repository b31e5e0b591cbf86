//! Reorder recommendations.
//!
//! Target stock covers supplier lead time plus a fixed safety buffer of
//! velocity:
//!
//! ```text
//! forecasted_need      = ceil(velocity * (lead_time_days + safety_buffer_days))
//! recommended_quantity = max(0, forecasted_need - current_stock)
//! ```

use serde::Deserialize;

use crate::error::{VelocityError, VelocityResult};
use crate::thresholds::{FORECAST_PRECISION, SAFETY_BUFFER_DAYS};
use crate::types::{ClassificationResult, ReorderRecommendation, StockStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct ReorderPolicy {
    pub safety_buffer_days: u32,
}

impl Default for ReorderPolicy {
    fn default() -> Self {
        Self {
            safety_buffer_days: SAFETY_BUFFER_DAYS,
        }
    }
}

/// Human-readable status line for a classification.
pub fn narrative_for(status: StockStatus) -> &'static str {
    match status {
        StockStatus::OutOfStock => "Out of stock! Immediate restock needed.",
        StockStatus::Critical => "Stock will run out soon. Reorder now.",
        StockStatus::Low => "Stock is running low. Schedule a reorder within lead time.",
        StockStatus::DeadStock => "Not selling. Hold reorders and review pricing or placement.",
        StockStatus::Healthy => "Stock levels healthy. No action needed.",
    }
}

/// Units needed to cover `days` of `daily_velocity`, rounded up.
pub fn forecast_units(daily_velocity: f64, days: u32) -> u64 {
    if !daily_velocity.is_finite() || daily_velocity <= 0.0 {
        return 0;
    }
    let raw = daily_velocity * f64::from(days);
    let settled = (raw * FORECAST_PRECISION).round() / FORECAST_PRECISION;
    settled.ceil() as u64
}

/// Size a reorder for a classified product.
///
/// Negative stock and negative or non-finite velocity are rejected, not
/// clamped.
pub fn recommend(
    classification: &ClassificationResult,
    daily_velocity: f64,
    lead_time_days: u32,
    current_stock: i64,
    policy: &ReorderPolicy,
) -> VelocityResult<ReorderRecommendation> {
    let on_hand = u64::try_from(current_stock).map_err(|_| VelocityError::InvalidStock {
        product_id: classification.product_id.clone(),
        field: "current_stock",
        value: current_stock,
    })?;
    if !daily_velocity.is_finite() || daily_velocity < 0.0 {
        return Err(VelocityError::InvalidVelocity {
            value: daily_velocity,
        });
    }

    let cover_days = lead_time_days.saturating_add(policy.safety_buffer_days);
    let forecasted_need = forecast_units(daily_velocity, cover_days);
    let recommended_quantity = forecasted_need.saturating_sub(on_hand);

    Ok(ReorderRecommendation {
        product_id: classification.product_id.clone(),
        recommended_quantity,
        forecasted_need,
        lead_time_days,
        safety_buffer_days: policy.safety_buffer_days,
        narrative_status: narrative_for(classification.status).to_string(),
        severity: classification.status.severity(),
    })
}
