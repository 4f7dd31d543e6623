use leptos::*;
use strum::IntoEnumIterator;

use crate::{
    domain::{
        logging::LogComponent,
        market_data::{CandlePeriod, Market},
        treemap::SortKind,
    },
    event_utils::{EventOptions, window_event_listener_with_options},
    global_state::{dashboard_config, is_mobile, selected_market, selected_period, sort_kind},
    infrastructure::services::is_mobile_viewport,
    presentation::{CandleChart, TreeChart},
};

const STYLE: &str = r#"
html, body { margin: 0; height: 100%; background: #f5f5f5; }
.dashboard {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
    display: flex;
    flex-direction: column;
    height: 100vh;
    color: #212121;
}
.header {
    display: flex;
    align-items: center;
    gap: 16px;
    padding: 12px 16px;
    background: #ffffff;
    border-bottom: 1px solid #e0e0e0;
}
.header h1 { font-size: 20px; margin: 0 auto 0 0; }
.header select { padding: 4px 8px; font-size: 14px; }
.panels {
    display: flex;
    flex: 1;
    gap: 8px;
    padding: 8px;
    min-height: 0;
}
.dashboard.mobile .panels { flex-direction: column; }
.panel {
    position: relative;
    flex: 1;
    min-width: 0;
    min-height: 0;
    background: #ffffff;
    border-radius: 8px;
    overflow: hidden;
}
.panel-title { position: absolute; right: 12px; top: 8px; font-weight: 600; pointer-events: none; }
.tree-chart, .candle-chart { width: 100%; height: 100%; touch-action: none; user-select: none; }
.tree-chart { cursor: pointer; }
.tree-chart .tile { transition: transform 500ms; }
.tree-chart .tile rect { transition: width 500ms, height 500ms, fill 500ms; }
.candle-chart { cursor: crosshair; }
.chart-tag {
    position: absolute;
    box-sizing: border-box;
    padding: 6px 10px;
    background: rgba(33, 33, 33, 0.85);
    color: #ffffff;
    border-radius: 6px;
    font-size: 12px;
    pointer-events: none;
}
.chart-tag-title { font-weight: 700; }
.chart-tag .rise { color: #ff8a80; }
.chart-tag .fall { color: #82b1ff; }
"#;

#[component]
pub fn App() -> impl IntoView {
    let breakpoint = dashboard_config().get_untracked().mobile_breakpoint_px;
    is_mobile().set(is_mobile_viewport(breakpoint));
    let handle = window_event_listener_with_options(ev::resize, &EventOptions::default(), move |_| {
        let mobile = is_mobile_viewport(breakpoint);
        if mobile != is_mobile().get_untracked() {
            is_mobile().set(mobile);
        }
    });
    on_cleanup(move || {
        if let Some(handle) = handle {
            handle.remove();
        }
    });

    crate::log_info!(LogComponent::Presentation("App"), "📐 Dashboard mounted");

    view! {
        <style>{STYLE}</style>
        <div class="dashboard" class:mobile=move || is_mobile().get()>
            <Header />
            <div class="panels">
                <div class="panel">
                    <TreeChart />
                </div>
                <div class="panel">
                    <div class="panel-title">
                        {move || format!("{} · {}", selected_market().get(), selected_period().get().label())}
                    </div>
                    <CandleChart />
                </div>
            </div>
        </div>
    }
}

#[component]
fn Header() -> impl IntoView {
    let markets = dashboard_config().get_untracked().market_list();

    view! {
        <header class="header">
            <h1>"CryptoGraph"</h1>
            <select
                aria-label="market"
                on:change=move |ev| {
                    if let Ok(market) = Market::new(&event_target_value(&ev)) {
                        selected_market().set(market);
                    }
                }
            >
                {markets
                    .into_iter()
                    .map(|market| {
                        let value = market.value().to_string();
                        let label = market.symbol().to_string();
                        view! {
                            <option value=value prop:selected=move || selected_market().get() == market>
                                {label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                aria-label="period"
                on:change=move |ev| {
                    if let Ok(period) = event_target_value(&ev).parse::<CandlePeriod>() {
                        selected_period().set(period);
                    }
                }
            >
                {CandlePeriod::iter()
                    .map(|period| {
                        view! {
                            <option value=period.to_string() prop:selected=move || selected_period().get() == period>
                                {period.label()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
            <select
                aria-label="sort"
                on:change=move |ev| {
                    if let Ok(sort) = event_target_value(&ev).parse::<SortKind>() {
                        sort_kind().set(sort);
                    }
                }
            >
                {SortKind::iter()
                    .map(|sort| {
                        view! {
                            <option value=sort.to_string() prop:selected=move || sort_kind().get() == sort>
                                {sort.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </header>
    }
}
