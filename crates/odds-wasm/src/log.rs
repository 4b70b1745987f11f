//! Browser console logging.

use wasm_bindgen::prelude::*;

/// Log to the browser console.
#[wasm_bindgen]
pub fn console_log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

pub fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

/// `format!`-style logging to the console: `log_info!`, `log_warn!`, `log_error!`.
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::log::console_log(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::log::console_warn(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::log::console_error(&format!($($t)*)))
}
