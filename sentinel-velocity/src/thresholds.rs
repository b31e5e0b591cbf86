//! Centralized thresholds for stock velocity classification.
//!
//! Both the product list and the analytics dashboard classify through
//! `classifier::classify`, which reads these values. Changing one here
//! changes every call site at once.

/// Daily velocity strictly below this is dead stock (not selling).
/// A velocity of exactly 0.1 is still considered moving.
pub const DEAD_STOCK_VELOCITY: f64 = 0.1;

/// Days of stock at or below this are critical.
pub const CRITICAL_DAYS: u64 = 2;

/// Days of stock at or below this (and above `CRITICAL_DAYS`) are low.
pub const LOW_DAYS: u64 = 7;

/// Days-of-stock sentinel for stock that is present but not moving.
pub const DAYS_OF_STOCK_SENTINEL: u64 = 999;

/// Default sales lookback window in days.
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Longest lookback window the config and pipelines accept (ten years).
pub const MAX_WINDOW_DAYS: i64 = 3650;

/// Default reorder level when the inventory record does not carry one.
pub const DEFAULT_REORDER_LEVEL: i64 = 10;

/// Days of velocity added on top of lead time when sizing a reorder.
pub const SAFETY_BUFFER_DAYS: u32 = 3;

/// Supplier lead time assumed when a product has none on file.
pub const DEFAULT_LEAD_TIME_DAYS: u32 = 7;

/// Decimal places kept before rounding a forecast up to whole units.
/// Absorbs binary noise such as `1.1 * 10.0 = 11.000000000000002`.
pub const FORECAST_PRECISION: f64 = 1_000_000.0;
