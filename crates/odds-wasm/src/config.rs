//! Dashboard configuration passed in from JavaScript.

use odds_core::{EnergySettings, Network, NetworkParams};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::{DashboardError, Result};

/// Shortest allowed refresh interval in seconds.
pub const MIN_REFRESH_SECS: u32 = 120;

/// Longest allowed refresh interval in seconds.
pub const MAX_REFRESH_SECS: u32 = 300;

/// Dashboard configuration. Every field is optional on the JS side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub network: Network,
    /// Base URL of the dashboard REST backend.
    pub api_base_url: String,
    /// Seconds between data refreshes.
    pub refresh_interval_secs: u32,
    /// Starting network parameters until live data arrives.
    pub network_params: NetworkParams,
    pub energy: EnergySettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            network: Network::Mainnet,
            api_base_url: "/api".to_string(),
            refresh_interval_secs: MAX_REFRESH_SECS,
            network_params: NetworkParams::default(),
            energy: EnergySettings::default(),
        }
    }
}

impl DashboardConfig {
    /// Parse from a JS object; `undefined` and `null` give the defaults.
    pub fn from_js(value: JsValue) -> Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: DashboardConfig = serde_wasm_bindgen::from_value(value)
            .map_err(|e| DashboardError::parse("config", e))?;
        config.validated()
    }

    /// Parse from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: DashboardConfig =
            serde_json::from_str(text).map_err(|e| DashboardError::parse("config", e))?;
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.energy.energy_rate < 0.0 {
            return Err(DashboardError::Config("energy_rate must not be negative".into()));
        }
        self.refresh_interval_secs = self
            .refresh_interval_secs
            .clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS);
        Ok(self)
    }

    /// Refresh interval in milliseconds, as the browser timer wants it.
    pub fn refresh_interval_ms(&self) -> i32 {
        (self.refresh_interval_secs * 1000) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.network_params.hashrate_ehs, 650.0);
        assert_eq!(config.refresh_interval_ms(), 300_000);
    }

    #[test]
    fn test_partial_override() {
        let config = DashboardConfig::from_json(
            r#"{"network":"testnet4","network_params":{"hashrate_ehs":750.0},"energy":{"energy_rate":0.3}}"#,
        )
        .unwrap();
        assert_eq!(config.network, Network::Testnet4);
        assert_eq!(config.network_params.hashrate_ehs, 750.0);
        assert_eq!(config.network_params.blocks_per_day, 144.0);
        assert_eq!(config.energy.energy_rate, 0.3);
        assert_eq!(config.energy.energy_currency, "USD");
    }

    #[test]
    fn test_refresh_interval_is_bounded() {
        let fast = DashboardConfig::from_json(r#"{"refresh_interval_secs":5}"#).unwrap();
        assert_eq!(fast.refresh_interval_secs, MIN_REFRESH_SECS);
        let slow = DashboardConfig::from_json(r#"{"refresh_interval_secs":3600}"#).unwrap();
        assert_eq!(slow.refresh_interval_secs, MAX_REFRESH_SECS);
    }

    #[test]
    fn test_rejects_negative_rate() {
        let err = DashboardConfig::from_json(r#"{"energy":{"energy_rate":-1.0}}"#).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = DashboardConfig::from_json("{").unwrap_err();
        assert!(matches!(err, DashboardError::Parse { what: "config", .. }));
    }
}
