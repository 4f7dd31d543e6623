use leptos::*;
use once_cell::sync::OnceCell;

use crate::config::DashboardConfig;
use crate::domain::{
    market_data::{CandlePeriod, Market},
    treemap::{CoinRateContent, SortKind},
};

/// Page-wide state shared by the header, the treemap and the candle chart
pub struct Globals {
    pub config: RwSignal<DashboardConfig>,
    pub selected_market: RwSignal<Market>,
    pub selected_period: RwSignal<CandlePeriod>,
    pub sort_kind: RwSignal<SortKind>,
    pub coin_contents: RwSignal<Vec<CoinRateContent>>,
    pub is_mobile: RwSignal<bool>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        config: create_rw_signal(DashboardConfig::default()),
        selected_market: create_rw_signal(Market::default()),
        selected_period: create_rw_signal(CandlePeriod::default()),
        sort_kind: create_rw_signal(SortKind::default()),
        coin_contents: create_rw_signal(Vec::new()),
        is_mobile: create_rw_signal(false),
    })
}

/// Seed the selections from `config`; later user choices overwrite them.
pub fn apply_config(config: DashboardConfig) {
    let globals = globals();
    globals.selected_market.set(config.default_market());
    globals.selected_period.set(config.default_period);
    globals.sort_kind.set(config.default_sort);
    globals.config.set(config);
}

crate::global_signals! {
    pub dashboard_config => config: DashboardConfig,
    pub selected_market => selected_market: Market,
    pub selected_period => selected_period: CandlePeriod,
    pub sort_kind => sort_kind: SortKind,
    pub coin_contents => coin_contents: Vec<CoinRateContent>,
    pub is_mobile => is_mobile: bool,
}
