//! Solo-odds calculator and formatter exports for the dashboard views.

use odds_core::revenue::{total_power_watts, DeviceEfficiency};
use odds_core::share::{all_time_best, top_shares, DeviceComparison, DeviceSnapshot};
use odds_core::{
    expected::expected_time_to_first_success, format, BestSharePrediction, CostAnalysis,
    ExpectedWait, Hashrate, Probability, ShareRecord, SoloReport,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::api::NetworkRefresh;
use crate::config::DashboardConfig;
use crate::state::{from_js, to_js, NetworkState};

/// Per-device efficiency with the combined draw.
#[derive(Debug, Serialize)]
pub struct FleetEfficiency {
    pub devices: Vec<DeviceEfficiency>,
    pub total_power_watts: f64,
}

impl FleetEfficiency {
    pub fn compute(snapshots: &[DeviceSnapshot]) -> Self {
        let devices: Vec<DeviceEfficiency> = snapshots.iter().map(DeviceEfficiency::from).collect();
        FleetEfficiency {
            total_power_watts: total_power_watts(&devices),
            devices,
        }
    }
}

/// Calculator bound to the current network parameters.
#[wasm_bindgen]
pub struct SoloCalculator {
    config: DashboardConfig,
    network: NetworkState,
}

impl SoloCalculator {
    pub fn from_config(config: DashboardConfig) -> Self {
        let network = NetworkState::new(config.network_params);
        SoloCalculator { config, network }
    }

    pub fn network_state_ref(&self) -> &NetworkState {
        &self.network
    }

    pub fn apply_refresh(&mut self, refresh: NetworkRefresh, now_ms: f64) {
        self.network.apply(&refresh.update, refresh.errors, now_ms);
    }

    pub fn solo_report(&self, hashrate_ghs: f64) -> SoloReport {
        SoloReport::compute(Hashrate::from_ghs(hashrate_ghs), &self.network.params)
    }
}

#[wasm_bindgen]
impl SoloCalculator {
    /// Create a calculator from a configuration object (or `undefined`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SoloCalculator, JsValue> {
        let config = DashboardConfig::from_js(config)?;
        Ok(Self::from_config(config))
    }

    /// Odds, expected wait and expected BTC for a hashrate in GH/s.
    pub fn report(&self, hashrate_ghs: f64) -> Result<JsValue, JsValue> {
        to_js(&self.solo_report(hashrate_ghs))
    }

    /// Prediction for beating the all-time best share.
    #[wasm_bindgen(js_name = bestShare)]
    pub fn best_share(&self, hashrate_ghs: f64, best_difficulty: f64) -> Result<JsValue, JsValue> {
        to_js(&BestSharePrediction::compute(
            Hashrate::from_ghs(hashrate_ghs),
            best_difficulty,
        ))
    }

    /// Energy cost and, when enabled, revenue for the given power draw.
    #[wasm_bindgen(js_name = costAnalysis)]
    pub fn cost_analysis(&self, power_watts: f64, hashrate_ghs: f64) -> Result<JsValue, JsValue> {
        to_js(&CostAnalysis::compute(
            power_watts,
            Hashrate::from_ghs(hashrate_ghs),
            &self.config.energy,
            &self.network.params,
        ))
    }

    /// Apply the `{ update, errors }` object returned by
    /// `NetworkDataApi.fetchNetworkData()`.
    #[wasm_bindgen(js_name = applyNetworkData)]
    pub fn apply_network_data(&mut self, refresh: JsValue) -> Result<(), JsValue> {
        let refresh: NetworkRefresh = from_js(refresh, "network data")?;
        self.apply_refresh(refresh, js_sys::Date::now());
        Ok(())
    }

    /// Power and efficiency for an array of device snapshots.
    #[wasm_bindgen(js_name = deviceEfficiency)]
    pub fn device_efficiency(&self, devices: JsValue) -> Result<JsValue, JsValue> {
        let snapshots: Vec<DeviceSnapshot> = from_js(devices, "device snapshots")?;
        to_js(&FleetEfficiency::compute(&snapshots))
    }

    /// Device snapshots side by side, fastest first.
    #[wasm_bindgen(js_name = deviceComparison)]
    pub fn device_comparison(&self, devices: JsValue) -> Result<JsValue, JsValue> {
        let snapshots: Vec<DeviceSnapshot> = from_js(devices, "device snapshots")?;
        to_js(&DeviceComparison::compute(&snapshots))
    }

    /// Highest distinct shares from an array of share records.
    #[wasm_bindgen(js_name = topShares)]
    pub fn ranked_shares(&self, records: JsValue, limit: usize) -> Result<JsValue, JsValue> {
        let records: Vec<ShareRecord> = from_js(records, "share records")?;
        to_js(&top_shares(&records, limit))
    }

    /// Prediction for beating the best of the given share records.
    #[wasm_bindgen(js_name = bestShareFromRecords)]
    pub fn best_share_from_records(
        &self,
        hashrate_ghs: f64,
        records: JsValue,
    ) -> Result<JsValue, JsValue> {
        let records: Vec<ShareRecord> = from_js(records, "share records")?;
        let best = all_time_best(&records).map_or(0.0, |r| r.difficulty);
        to_js(&BestSharePrediction::compute(Hashrate::from_ghs(hashrate_ghs), best))
    }

    /// Current network parameters with update time and last errors.
    #[wasm_bindgen(js_name = networkState)]
    pub fn network_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.network)
    }

    /// True when no live data arrived within two refresh intervals.
    #[wasm_bindgen(js_name = isNetworkStale)]
    pub fn is_network_stale(&self) -> bool {
        let max_age = 2.0 * self.config.refresh_interval_ms() as f64;
        self.network.is_stale(js_sys::Date::now(), max_age)
    }

    #[wasm_bindgen(getter, js_name = refreshIntervalMs)]
    pub fn refresh_interval_ms(&self) -> i32 {
        self.config.refresh_interval_ms()
    }
}

fn absent_as_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}

/// Chance of at least one success in `trials` attempts.
#[wasm_bindgen(js_name = probabilityAtLeastOne)]
pub fn probability_at_least_one(per_trial: f64, trials: f64) -> f64 {
    odds_core::probability_at_least_one(Probability::new(per_trial), trials).value()
}

/// Expected time units to the first success; `undefined` when unbounded.
#[wasm_bindgen(js_name = expectedTimeToFirstSuccess)]
pub fn expected_time(per_trial: f64, trials_per_unit: f64) -> Option<f64> {
    expected_time_to_first_success(Probability::new(per_trial), trials_per_unit).finite()
}

#[wasm_bindgen(js_name = formatCount)]
pub fn format_count(value: Option<f64>) -> String {
    format::format_count(absent_as_nan(value))
}

#[wasm_bindgen(js_name = formatDifficulty)]
pub fn format_difficulty(value: Option<f64>) -> String {
    format::format_difficulty(absent_as_nan(value))
}

#[wasm_bindgen(js_name = formatProbability)]
pub fn format_probability(value: Option<f64>) -> String {
    format::format_probability(absent_as_nan(value))
}

/// A wait from JS: `Infinity` is unbounded; absent, NaN and negative
/// values are not.
fn wait_from_js(value: Option<f64>) -> Option<ExpectedWait> {
    match value {
        Some(v) if v == f64::INFINITY => Some(ExpectedWait::Unbounded),
        Some(v) if v.is_finite() && v >= 0.0 => Some(ExpectedWait::Finite(v)),
        _ => None,
    }
}

/// Format an expected wait in years. `Infinity` renders as never.
#[wasm_bindgen(js_name = formatExpectedYears)]
pub fn format_expected_years(years: Option<f64>) -> String {
    wait_from_js(years).map_or_else(
        || format::NOT_AVAILABLE.to_string(),
        format::format_expected_years,
    )
}

/// Format a duration in hours. `Infinity` renders as never.
#[wasm_bindgen(js_name = formatTimeDuration)]
pub fn format_time_duration(hours: Option<f64>) -> String {
    wait_from_js(hours).map_or_else(
        || format::NOT_AVAILABLE.to_string(),
        format::format_time_duration,
    )
}

#[wasm_bindgen(js_name = formatHashrateGhs)]
pub fn format_hashrate_ghs(ghs: Option<f64>) -> String {
    format::format_hashrate(Hashrate::from_ghs(absent_as_nan(ghs)))
}

#[wasm_bindgen(js_name = formatBtc)]
pub fn format_btc(btc: Option<f64>) -> String {
    format::format_btc(absent_as_nan(btc))
}
