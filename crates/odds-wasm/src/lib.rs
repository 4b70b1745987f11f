//! WebAssembly bindings for the solo-mining odds dashboard.
//!
//! This crate provides JavaScript-accessible APIs for:
//! - Computing solo odds, best-share predictions and cost analysis
//! - Formatting values with the shared sentinels and thresholds
//! - Fetching network data from public APIs
//! - Calling the dashboard backend and reporting expired sessions
//! - Driving the periodic refresh

use wasm_bindgen::prelude::*;

pub mod api;
pub mod calculator;
pub mod config;
pub mod error;
pub mod log;
pub mod session;
pub mod state;
pub mod timer;

// Re-export main types for JS access
pub use api::{DashboardApi, NetworkDataApi};
pub use calculator::SoloCalculator;
pub use config::DashboardConfig;
pub use error::DashboardError;
pub use session::{SessionChannel, SessionEvent, SessionEvents};
pub use timer::RefreshTimer;

/// Initialize the WASM module with better panic messages.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
