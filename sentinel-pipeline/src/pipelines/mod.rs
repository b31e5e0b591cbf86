pub mod product_analytics;
pub mod product_list;

use sentinel_velocity::thresholds::MAX_WINDOW_DAYS;
use sentinel_velocity::{VelocityError, VelocityResult};

/// Reject an out-of-range window before any stage runs, so the caller gets
/// `InvalidWindow` instead of an empty result.
pub(crate) fn check_window(window_days: i64) -> VelocityResult<()> {
    if window_days <= 0 || window_days > MAX_WINDOW_DAYS {
        return Err(VelocityError::InvalidWindow { window_days });
    }
    Ok(())
}
