//! State held between refreshes and its conversion for JavaScript.

use odds_core::{NetworkParams, NetworkUpdate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::error::DashboardError;

/// Convert any serializable value to a JS value.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {:?}", e)))
}

/// Read a JS value into `T`; `what` names it in the error.
pub fn from_js<T: DeserializeOwned>(value: JsValue, what: &'static str) -> crate::error::Result<T> {
    serde_wasm_bindgen::from_value(value).map_err(|e| DashboardError::parse(what, e))
}

/// The network parameters in use and where they came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkState {
    pub params: NetworkParams,
    /// When live data last arrived (ms since epoch); `None` while on defaults.
    pub updated_at_ms: Option<f64>,
    /// Errors from the most recent refresh.
    pub errors: Vec<String>,
}

impl NetworkState {
    pub fn new(params: NetworkParams) -> Self {
        NetworkState {
            params,
            ..Self::default()
        }
    }

    /// Apply a refresh result received at `now_ms`.
    pub fn apply(&mut self, update: &NetworkUpdate, errors: Vec<String>, now_ms: f64) {
        if self.params.apply(update) {
            self.updated_at_ms = Some(now_ms);
        }
        self.errors = errors;
    }

    /// Whether the parameters are older than `max_age_ms` (or never updated).
    pub fn is_stale(&self, now_ms: f64, max_age_ms: f64) -> bool {
        match self.updated_at_ms {
            Some(at) => now_ms - at > max_age_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_tracks_update_time() {
        let mut state = NetworkState::new(NetworkParams::default());
        assert!(state.is_stale(0.0, 1_000.0));

        state.apply(&NetworkUpdate::default(), vec!["down".to_string()], 5_000.0);
        assert_eq!(state.updated_at_ms, None);
        assert_eq!(state.errors, vec!["down"]);

        let update = NetworkUpdate {
            hashrate_ehs: Some(800.0),
            ..NetworkUpdate::default()
        };
        state.apply(&update, Vec::new(), 6_000.0);
        assert_eq!(state.params.hashrate_ehs, 800.0);
        assert_eq!(state.updated_at_ms, Some(6_000.0));
        assert!(state.errors.is_empty());
        assert!(!state.is_stale(6_500.0, 1_000.0));
        assert!(state.is_stale(8_000.0, 1_000.0));
    }

    #[test]
    fn test_rejected_update_does_not_refresh() {
        let mut state = NetworkState::new(NetworkParams::default());
        let zeros = NetworkUpdate {
            hashrate_ehs: Some(0.0),
            difficulty: Some(0.0),
            btc_price: Some(0.0),
        };
        state.apply(&zeros, Vec::new(), 5_000.0);
        assert_eq!(state.updated_at_ms, None);
        assert!(state.is_stale(5_000.0, 1_000.0));
    }
}
