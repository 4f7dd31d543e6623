use crypto_graph_wasm::config::DashboardConfig;
use crypto_graph_wasm::domain::market_data::{CandlePeriod, Market};
use crypto_graph_wasm::domain::treemap::SortKind;
use crypto_graph_wasm::global_state::{
    apply_config, coin_contents, dashboard_config, selected_market, selected_period, sort_kind,
};
use leptos::*;

#[test]
fn config_seeds_selections() {
    let config = DashboardConfig {
        default_market: "KRW-XRP".to_string(),
        default_period: CandlePeriod::FiveMinutes,
        default_sort: SortKind::ChangeRate,
        ..DashboardConfig::default()
    };
    apply_config(config.clone());

    assert_eq!(selected_market().get_untracked(), Market::from_symbol("XRP"));
    assert_eq!(selected_period().get_untracked(), CandlePeriod::FiveMinutes);
    assert_eq!(sort_kind().get_untracked(), SortKind::ChangeRate);
    assert_eq!(dashboard_config().get_untracked(), config);
    assert!(coin_contents().with_untracked(Vec::is_empty));
}
