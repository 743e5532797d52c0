use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

/// Upper bound on the forecast horizon accepted from configuration.
pub const MAX_HORIZON_MONTHS: u32 = 12;

/// Stores user-configurable forecast preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Balance below which a projected day raises an alert.
    #[serde(default = "Config::default_buffer_amount")]
    pub buffer_amount: f64,
    #[serde(default = "Config::default_horizon_months")]
    pub forecast_horizon_months: u32,
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Snapshot file used when the CLI is not given one explicitly.
    pub default_snapshot: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_amount: Self::default_buffer_amount(),
            forecast_horizon_months: Self::default_horizon_months(),
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_snapshot: None,
        }
    }
}

impl Config {
    pub fn default_buffer_amount() -> f64 {
        50.0
    }

    pub fn default_horizon_months() -> u32 {
        3
    }

    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "USD".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.buffer_amount.is_finite() || self.buffer_amount < 0.0 {
            return Err(ConfigError::Validation(format!(
                "buffer_amount must be a non-negative number, got {}",
                self.buffer_amount
            )));
        }
        if !(1..=MAX_HORIZON_MONTHS).contains(&self.forecast_horizon_months) {
            return Err(ConfigError::Validation(format!(
                "forecast_horizon_months must be within 1..={MAX_HORIZON_MONTHS}, got {}",
                self.forecast_horizon_months
            )));
        }
        Ok(())
    }
}
