//! Forecast configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reorder::ReorderPolicy;
use crate::thresholds::{
    DEFAULT_LEAD_TIME_DAYS, DEFAULT_REORDER_LEVEL, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS,
    SAFETY_BUFFER_DAYS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Sales lookback window in complete days.
    pub window_days: i64,
    /// Lead time for products without a supplier lead time on file.
    pub default_lead_time_days: u32,
    pub safety_buffer_days: u32,
    /// Reorder level for inventory rows that omit one.
    pub default_reorder_level: i64,
    /// Scale velocity by active demand events before classifying.
    pub apply_demand_events: bool,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            default_lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            safety_buffer_days: SAFETY_BUFFER_DAYS,
            default_reorder_level: DEFAULT_REORDER_LEVEL,
            apply_demand_events: true,
        }
    }
}

impl ForecastConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ForecastConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_days <= 0 || self.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Invalid(format!(
                "window_days must be in 1..={}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        if self.default_reorder_level < 0 {
            return Err(ConfigError::Invalid(format!(
                "default_reorder_level must not be negative, got {}",
                self.default_reorder_level
            )));
        }
        Ok(())
    }

    pub fn reorder_policy(&self) -> ReorderPolicy {
        ReorderPolicy {
            safety_buffer_days: self.safety_buffer_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ForecastConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ForecastConfig::default());
        assert_eq!(config.window_days, 30);
        assert_eq!(config.safety_buffer_days, 3);
        assert_eq!(config.default_reorder_level, 10);
        assert!(config.apply_demand_events);
    }

    #[test]
    fn partial_document_overrides_fields() {
        let config =
            ForecastConfig::from_json_str(r#"{"window_days": 14, "apply_demand_events": false}"#)
                .unwrap();
        assert_eq!(config.window_days, 14);
        assert!(!config.apply_demand_events);
        assert_eq!(config.default_lead_time_days, 7);
    }

    #[test]
    fn rejects_non_positive_window() {
        let err = ForecastConfig::from_json_str(r#"{"window_days": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_window_beyond_ten_years() {
        let err = ForecastConfig::from_json_str(r#"{"window_days": 1000000000}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(ForecastConfig::from_json_str(r#"{"window_days": 3650}"#).is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ForecastConfig::from_json_str("{window_days: 30").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ForecastConfig::from_json_file("/nonexistent/forecast.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/forecast.json"));
    }
}
