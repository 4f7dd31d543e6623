use leptos::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::{
    app::App,
    config::DashboardConfig,
    domain::logging::LogComponent,
    global_state::apply_config,
};

/// Mount the dashboard.
///
/// `config_json` overrides the defaults; without it the page's
/// `<script id="dashboard-config">` is used. `mount_id` names the element
/// to render into, the body when absent or not found.
#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard(config_json: Option<String>, mount_id: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref() {
        Some(json) => DashboardConfig::from_json_or_default(Some(json)),
        None => DashboardConfig::from_document(),
    };
    crate::log_info!(
        LogComponent::Presentation("WasmApi"),
        "🚀 Starting dashboard with {} markets",
        config.markets.len()
    );
    apply_config(config);

    let target = mount_id.and_then(|id| {
        web_sys::window()?
            .document()?
            .get_element_by_id(&id)?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    });
    match target {
        Some(parent) => mount_to(parent, App),
        None => mount_to_body(App),
    }
    Ok(())
}
