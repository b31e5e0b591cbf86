//! Stock position resolution: physical vs. allocated vs. available.

use serde::Serialize;

use crate::error::{VelocityError, VelocityResult};
use crate::types::{LegacyStockStatus, StockPosition};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedStock {
    pub product_id: String,
    /// `max(0, current_stock - allocated_stock)`.
    pub available_stock: i64,
    pub legacy_status: LegacyStockStatus,
}

/// Reject negative stock figures.
///
/// Negative values mean an upstream inventory bug. They are surfaced, never
/// clamped.
pub fn validate(position: &StockPosition) -> VelocityResult<()> {
    let fields = [
        ("current_stock", position.current_stock),
        ("allocated_stock", position.allocated_stock),
        ("reorder_level", position.reorder_level),
    ];
    for (field, value) in fields {
        if value < 0 {
            return Err(VelocityError::InvalidStock {
                product_id: position.product_id.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

pub fn resolve(position: &StockPosition) -> VelocityResult<ResolvedStock> {
    validate(position)?;

    let available_stock = (position.current_stock - position.allocated_stock).max(0);
    let legacy_status = if position.current_stock == 0 {
        LegacyStockStatus::OutOfStock
    } else if position.current_stock <= position.reorder_level {
        LegacyStockStatus::LowStock
    } else {
        LegacyStockStatus::InStock
    };

    Ok(ResolvedStock {
        product_id: position.product_id.clone(),
        available_stock,
        legacy_status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(current: i64, allocated: i64, reorder_level: i64) -> StockPosition {
        StockPosition {
            product_id: "SKU-1".into(),
            current_stock: current,
            allocated_stock: allocated,
            reorder_level,
        }
    }

    #[test]
    fn available_subtracts_allocated() {
        let resolved = resolve(&position(50, 12, 10)).unwrap();
        assert_eq!(resolved.available_stock, 38);
        assert_eq!(resolved.legacy_status, LegacyStockStatus::InStock);
    }

    #[test]
    fn over_allocation_floors_available_at_zero() {
        let resolved = resolve(&position(5, 9, 10)).unwrap();
        assert_eq!(resolved.available_stock, 0);
        // legacy status looks at physical stock only
        assert_eq!(resolved.legacy_status, LegacyStockStatus::LowStock);
    }

    #[test]
    fn legacy_status_thresholds() {
        assert_eq!(
            resolve(&position(0, 0, 10)).unwrap().legacy_status,
            LegacyStockStatus::OutOfStock
        );
        assert_eq!(
            resolve(&position(10, 0, 10)).unwrap().legacy_status,
            LegacyStockStatus::LowStock
        );
        assert_eq!(
            resolve(&position(11, 0, 10)).unwrap().legacy_status,
            LegacyStockStatus::InStock
        );
        // zero reorder level: any stock is in stock
        assert_eq!(
            resolve(&position(1, 0, 0)).unwrap().legacy_status,
            LegacyStockStatus::InStock
        );
    }

    #[test]
    fn negative_values_are_rejected_not_clamped() {
        assert_eq!(
            resolve(&position(-3, 0, 10)),
            Err(VelocityError::InvalidStock {
                product_id: "SKU-1".into(),
                field: "current_stock",
                value: -3,
            })
        );
        let err = resolve(&position(3, -1, 10)).unwrap_err();
        assert!(matches!(
            err,
            VelocityError::InvalidStock { field: "allocated_stock", value: -1, .. }
        ));
        let err = resolve(&position(3, 0, -10)).unwrap_err();
        assert!(matches!(err, VelocityError::InvalidStock { field: "reorder_level", .. }));
    }
}
