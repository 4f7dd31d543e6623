use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod event_utils;
pub mod global_state;
pub mod infrastructure;
pub mod macros;
pub mod presentation;
pub mod time_utils;
pub mod view_state;

/// Install the panic hook, the console logger and the browser clock.
///
/// The dashboard itself is mounted by `startDashboard`.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    domain::logging::set_min_level(if cfg!(debug_assertions) { LogLevel::Debug } else { LogLevel::Info });
    domain::logging::init_logger(Box::new(infrastructure::services::ConsoleLogger::new()));
    domain::logging::init_time_provider(Box::new(infrastructure::services::BrowserTimeProvider::new()));

    crate::log_info!(LogComponent::Presentation("Initialize"), "🚀 Logging initialized");
}
