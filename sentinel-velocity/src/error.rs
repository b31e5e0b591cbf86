//! Velocity core error types.
//!
//! Every failure mode has a named variant and is recoverable by the caller.
//! Zero stock, zero velocity and no matching events are valid inputs, not
//! errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum VelocityError {
    #[error("Invalid aggregation window: {window_days} days (must be positive)")]
    InvalidWindow { window_days: i64 },

    #[error("Invalid stock for {product_id}: {field} = {value}")]
    InvalidStock {
        product_id: String,
        field: &'static str,
        value: i64,
    },

    #[error("Invalid daily velocity: {value}")]
    InvalidVelocity { value: f64 },

    #[error("No stock position for product: {0}")]
    MissingProduct(String),
}

/// Result type alias for velocity core operations.
pub type VelocityResult<T> = Result<T, VelocityError>;
