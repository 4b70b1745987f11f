//! Errors raised by the browser-facing layer.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("HTTP error: {0}")]
    Http(u16),

    /// The backend rejected the session. Emitted to the session channel
    /// before being returned.
    #[error("Session is no longer authorized")]
    Unauthorized,

    #[error("Session events already have a subscriber")]
    AlreadySubscribed,

    #[error("Failed to parse {what}: {reason}")]
    Parse { what: &'static str, reason: String },

    #[error("No window")]
    NoWindow,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JavaScript error: {0}")]
    Js(String),
}

impl DashboardError {
    pub fn parse(what: &'static str, err: impl core::fmt::Display) -> Self {
        DashboardError::Parse {
            what,
            reason: err.to_string(),
        }
    }
}

impl From<JsValue> for DashboardError {
    fn from(value: JsValue) -> Self {
        DashboardError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<DashboardError> for JsValue {
    fn from(err: DashboardError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = core::result::Result<T, DashboardError>;
