#![cfg(target_arch = "wasm32")]
use crypto_graph_wasm::presentation::wasm_api::start_dashboard;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn mounts_into_requested_element() {
    let document = web_sys::window().unwrap().document().unwrap();
    let host = document.create_element("div").unwrap();
    host.set_id("dashboard-host");
    document.body().unwrap().append_child(&host).unwrap();

    start_dashboard(Some(r#"{"markets":["BTC","ETH"]}"#.to_string()), Some("dashboard-host".to_string()))
        .unwrap();

    assert!(host.query_selector(".dashboard").unwrap().is_some());
    assert!(host.query_selector(".tree-chart").unwrap().is_some());
    assert!(host.query_selector(".candle-chart").unwrap().is_some());
}
