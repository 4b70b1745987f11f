//! Interval timer driving the periodic data refresh.

use wasm_bindgen::prelude::*;

use crate::config::{MAX_REFRESH_SECS, MIN_REFRESH_SECS};
use crate::error::DashboardError;

/// Browser interval that calls back on every refresh tick.
///
/// Stopping or dropping the timer clears the interval, so a torn-down view
/// receives no further ticks.
#[wasm_bindgen]
pub struct RefreshTimer {
    interval_ms: i32,
    handle: Option<i32>,
    tick: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl RefreshTimer {
    /// Create a stopped timer; the interval is bounded to 2-5 minutes.
    #[wasm_bindgen(constructor)]
    pub fn new(interval_secs: u32) -> RefreshTimer {
        let secs = interval_secs.clamp(MIN_REFRESH_SECS, MAX_REFRESH_SECS);
        RefreshTimer {
            interval_ms: (secs * 1000) as i32,
            handle: None,
            tick: None,
        }
    }

    /// Start calling `callback` every interval. Restarts if already running.
    pub fn start(&mut self, callback: js_sys::Function) -> Result<(), JsValue> {
        self.stop();

        let tick = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                crate::log_error!("Refresh callback failed: {:?}", e);
            }
        });
        let window = web_sys::window().ok_or(DashboardError::NoWindow)?;
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            self.interval_ms,
        )?;

        self.handle = Some(handle);
        self.tick = Some(tick);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(handle);
            }
        }
        self.tick = None;
    }

    #[wasm_bindgen(getter)]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    #[wasm_bindgen(getter)]
    pub fn interval_ms(&self) -> i32 {
        self.interval_ms
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
