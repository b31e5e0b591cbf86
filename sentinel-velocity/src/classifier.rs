//! Velocity classification: days of stock and urgency tier.
//!
//! This is the single implementation shared by the product list and the
//! analytics dashboard. Both must report the same status and days of stock
//! for the same `(current_stock, daily_velocity)` pair, so nothing else in
//! the workspace divides stock by velocity.
//!
//! Decision order (first match wins):
//! 1. `current_stock == 0` -> `OutOfStock`, 0 days
//! 2. `daily_velocity < 0.1` -> `DeadStock`, 999 days
//! 3. `floor(current_stock / daily_velocity)` days:
//!    `<= 2` critical, `<= 7` low, otherwise healthy
//!
//! Days are truncated, not rounded. 2.8 days of cover is 2 full days.

use crate::error::{VelocityError, VelocityResult};
use crate::stock;
use crate::thresholds::{CRITICAL_DAYS, DAYS_OF_STOCK_SENTINEL, DEAD_STOCK_VELOCITY, LOW_DAYS};
use crate::types::{
    Classification, ClassificationResult, StockPosition, StockStatus, VelocityProfile,
};

pub fn classify(current_stock: i64, daily_velocity: f64) -> VelocityResult<Classification> {
    if current_stock < 0 {
        return Err(VelocityError::InvalidStock {
            product_id: String::new(),
            field: "current_stock",
            value: current_stock,
        });
    }
    if !daily_velocity.is_finite() || daily_velocity < 0.0 {
        return Err(VelocityError::InvalidVelocity {
            value: daily_velocity,
        });
    }

    if current_stock == 0 {
        return Ok(Classification {
            days_of_stock: 0,
            status: StockStatus::OutOfStock,
        });
    }

    // Strict: exactly 0.1 is still moving. Also covers zero velocity.
    if daily_velocity < DEAD_STOCK_VELOCITY {
        return Ok(Classification {
            days_of_stock: DAYS_OF_STOCK_SENTINEL,
            status: StockStatus::DeadStock,
        });
    }

    let raw_days = current_stock as f64 / daily_velocity;
    // `as` saturates for very large ratios.
    let days_of_stock = raw_days.floor() as u64;

    let status = if days_of_stock <= CRITICAL_DAYS {
        StockStatus::Critical
    } else if days_of_stock <= LOW_DAYS {
        StockStatus::Low
    } else {
        StockStatus::Healthy
    };

    Ok(Classification {
        days_of_stock,
        status,
    })
}

/// Classify a product from its stock snapshot and velocity profile.
///
/// Uses physical `current_stock`, not available stock.
pub fn classify_position(
    position: &StockPosition,
    profile: &VelocityProfile,
) -> VelocityResult<ClassificationResult> {
    if position.product_id != profile.product_id {
        return Err(VelocityError::MissingProduct(profile.product_id.clone()));
    }
    classify_with_velocity(position, profile.daily_velocity)
}

/// Classify a product against an explicit velocity, e.g. one already
/// scaled by demand events.
pub fn classify_with_velocity(
    position: &StockPosition,
    daily_velocity: f64,
) -> VelocityResult<ClassificationResult> {
    stock::validate(position)?;
    let Classification {
        days_of_stock,
        status,
    } = classify(position.current_stock, daily_velocity)?;
    Ok(ClassificationResult {
        product_id: position.product_id.clone(),
        days_of_stock,
        status,
    })
}
