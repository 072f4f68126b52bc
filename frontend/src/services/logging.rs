use gloo::net::http::Request;
use shared::LogRequest;
use wasm_bindgen_futures::spawn_local;

use super::api::DEFAULT_BASE_URL;

/// Forwards component-tagged log lines to the server log, and mirrors them
/// to the browser console.
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::log!(format!("[{}] {}", component, message));
        Self::log("info", message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, component);
    }

    fn log(level: &str, message: &str, component: &str) {
        let request = LogRequest {
            level: level.to_string(),
            message: message.to_string(),
            component: Some(component.to_string()),
        };

        // Fire and forget
        spawn_local(async move {
            if let Ok(builder) = Request::post(&format!("{}/api/logs", DEFAULT_BASE_URL)).json(&request) {
                let _ = builder.send().await;
            }
        });
    }
}
