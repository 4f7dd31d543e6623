//! SVG candlestick chart with drag panning, wheel zoom and history paging.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use leptos::{html::Div, *};
use web_sys::{PointerEvent, WheelEvent};

use crate::{
    application::{CandleFeed, CandleHistoryUseCase, FeedUpdate, FetchTicket},
    domain::{
        chart::{
            CandleChartOption, CandleRenderOption, Color, PRICE_AXIS_WIDTH, PRICE_TICK_COUNT, PointerData,
            PriceScale, decimals_for_step, format_price, price_decimals, tick_step, time_label_stride,
        },
        logging::LogComponent,
        market_data::{Candle, CandleHistory, CandlePeriod},
    },
    event_utils::{EventListenerHandle, EventOptions, event_listener_with_options, window_event_listener_with_options},
    global_state::{dashboard_config, selected_market, selected_period},
    infrastructure::http::UpbitRestClient,
    time_utils::{format_pointer_date, format_time_label},
    view_state::CandleViewState,
};

/// Candle width change per wheel notch
const WHEEL_ZOOM_STEP: f64 = 1.0;
const AXIS_FONT_SIZE: f64 = 11.0;
const PRICE_INFO_FONT_SIZE: f64 = 12.0;

fn run_fetch(
    client: UpbitRestClient,
    feed: RwSignal<CandleFeed>,
    viewport: RwSignal<CandleViewState>,
    ticket: FetchTicket,
) {
    spawn_local(async move {
        let result = CandleHistoryUseCase::new(client.clone()).execute(&ticket).await;
        let option = ticket.option.clone();
        match feed.try_update(|f| f.finish(ticket, result)) {
            Some(FeedUpdate::Loaded(count)) => {
                crate::log_info!(LogComponent::Presentation("CandleChart"), "📊 {count} candles loaded for {option}");
            }
            Some(FeedUpdate::Appended(count)) => {
                crate::log_debug!(LogComponent::Presentation("CandleChart"), "⬅️ {count} older candles for {option}");
            }
            Some(FeedUpdate::Prepended(added)) if added > 0 => {
                viewport.try_update(|v| v.shift_for_prepended(added));
            }
            Some(FeedUpdate::Gap) => {
                crate::log_warn!(LogComponent::Presentation("CandleChart"), "⏭️ Refresh skipped candles for {option}");
                if let Some(ticket) = feed.try_update(|f| f.begin_refresh()).flatten() {
                    run_fetch(client, feed, viewport, ticket);
                }
            }
            Some(FeedUpdate::Replaced(count)) => {
                crate::log_info!(LogComponent::Presentation("CandleChart"), "📊 Reloaded {count} candles for {option}");
                viewport.try_update(|v| v.reset(v.option.candle_width));
            }
            Some(FeedUpdate::Rejected) => {
                crate::log_warn!(
                    LogComponent::Presentation("CandleChart"),
                    "⚠️ Older page for {option} was not older than the loaded history"
                );
            }
            Some(FeedUpdate::Stale) => {
                crate::log_debug!(LogComponent::Presentation("CandleChart"), "Dropped answer for {option}");
            }
            _ => {}
        }
    });
}

#[component]
pub fn CandleChart() -> impl IntoView {
    let config = dashboard_config().get_untracked();
    let client = store_value(UpbitRestClient::new(&config.api_base, config.market_cap_url.clone()));
    let default_width = config.default_candle_width;

    let feed = create_rw_signal(CandleFeed::default());
    let viewport = create_rw_signal(CandleViewState::new(CandleRenderOption::with_bounds(
        0.0,
        0.0,
        config.min_candle_width,
        config.default_candle_width,
        config.max_candle_width,
    )));
    let pointer = create_rw_signal(PointerData::HIDDEN);
    let drag_x = store_value(None::<f64>);
    let container = create_node_ref::<Div>();

    // series changed: start over from the newest candles
    create_effect(move |_| {
        let option = CandleChartOption::new(selected_period().get(), selected_market().get());
        crate::log_info!(LogComponent::Presentation("CandleChart"), "🔄 Showing {option}");
        let ticket = feed.try_update(|f| {
            f.reset(option);
            f.begin_initial()
        });
        viewport.update(|v| v.reset(default_width));
        pointer.set(PointerData::HIDDEN);
        if let Some(ticket) = ticket {
            run_fetch(client.get_value(), feed, viewport, ticket);
        }
    });

    // page in older history as the window nears the end of what is loaded
    create_effect(move |_| {
        let ready = feed.with(|f| {
            let history = f.history();
            !f.is_fetching()
                && !f.older_failed()
                && viewport.with(|v| v.needs_fetch(history.len(), history.is_exhausted()))
        });
        if !ready {
            return;
        }
        if let Some(ticket) = feed.try_update(|f| f.begin_older()).flatten() {
            run_fetch(client.get_value(), feed, viewport, ticket);
        }
    });

    let refresh = Interval::new(config.refresh_interval_ms, move || {
        if let Some(ticket) = feed.try_update(|f| f.begin_refresh()).flatten() {
            run_fetch(client.get_value(), feed, viewport, ticket);
        }
    });

    let listeners: Rc<RefCell<Vec<EventListenerHandle>>> = Rc::default();
    let measure = move || {
        if let Some(el) = container.get_untracked() {
            let rect = el.get_bounding_client_rect();
            viewport.update(|v| v.resize(rect.width(), rect.height()));
            pointer.set(PointerData::HIDDEN);
        }
    };
    {
        let listeners = Rc::clone(&listeners);
        container.on_load(move |el| {
            request_animation_frame(measure);
            let handle = event_listener_with_options(&el, ev::wheel, &EventOptions::active(), move |e: WheelEvent| {
                e.prevent_default();
                let delta_y = e.delta_y();
                if delta_y != 0.0 {
                    viewport.update(|v| v.zoom(-delta_y.signum() * WHEEL_ZOOM_STEP));
                    pointer.set(PointerData::HIDDEN);
                }
            });
            listeners.borrow_mut().push(handle);
        });
    }
    if let Some(handle) = window_event_listener_with_options(ev::resize, &EventOptions::default(), move |_| measure()) {
        listeners.borrow_mut().push(handle);
    }
    on_cleanup(move || {
        drop(refresh);
        for handle in listeners.take() {
            handle.remove();
        }
    });

    let local_point = move |e: &PointerEvent| -> Option<(f64, f64)> {
        let rect = container.get_untracked()?.get_bounding_client_rect();
        Some((e.client_x() as f64 - rect.left(), e.client_y() as f64 - rect.top()))
    };

    let on_pointer_down = move |e: PointerEvent| {
        if let Some((x, _)) = local_point(&e) {
            drag_x.set_value(Some(x));
        }
    };
    let on_pointer_move = move |e: PointerEvent| {
        let Some((x, y)) = local_point(&e) else {
            return;
        };
        if let Some(last) = drag_x.get_value() {
            let len = feed.with_untracked(|f| f.history().len());
            viewport.update(|v| v.pan(x - last, len));
            drag_x.set_value(Some(x));
            if feed.with_untracked(|f| f.older_failed()) {
                feed.update(|f| f.retry_older());
            }
        }
        let len = feed.with_untracked(|f| f.history().len());
        let next = viewport.with_untracked(|v| {
            let inside = y >= 0.0 && y <= v.option.area_height();
            let data_index = if inside { v.index_at(x, len) } else { None };
            PointerData { x, y, data_index, visible: data_index.is_some() }
        });
        pointer.set(next);
    };
    let end_drag = move |_: PointerEvent| drag_x.set_value(None);
    let on_pointer_leave = move |_: PointerEvent| {
        drag_x.set_value(None);
        pointer.set(PointerData::HIDDEN);
    };

    let size = move || viewport.with(|v| (v.option.width, v.option.height));
    let period = move || feed.with(|f| f.option().period);

    let scale = create_memo(move |_| {
        feed.with(|f| {
            viewport.with(|v| {
                let range = v.visible_range(f.history().len());
                PriceScale::for_range(f.history(), range, v.option.price_area_height())
            })
        })
    });

    view! {
        <div
            class="candle-chart"
            node_ref=container
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=end_drag
            on:pointerleave=on_pointer_leave
        >
            <svg width=move || size().0 height=move || size().1>
                {move || {
                    let Some(scale) = scale.get() else {
                        return view! { <text x=10 y=20 fill="#9e9e9e">"Loading..."</text> }.into_view();
                    };
                    feed.with(|f| {
                        viewport.with(|v| {
                            let history = f.history();
                            view! {
                                {price_axis(v, &scale)}
                                {time_axis(history, v, period())}
                                <svg width=v.option.area_width() height=v.option.area_height()>
                                    {volume_layer(history, v)}
                                    {candle_layer(history, v, &scale)}
                                </svg>
                                {current_price_marker(history, v, &scale)}
                            }
                            .into_view()
                        })
                    })
                }}
                {move || {
                    let scale = scale.get()?;
                    let pointer = pointer.get();
                    feed.with(|f| viewport.with(|v| pointer_layer(&pointer, f.history(), v, &scale, period())))
                }}
                <text class="price-info" x=8 y=16 font-size=PRICE_INFO_FONT_SIZE>
                    {move || {
                        let index = pointer.with(|p| p.data_index);
                        feed.with(|f| {
                            let history = f.history();
                            index.and_then(|i| history.get(i)).or(history.latest()).map(price_info).unwrap_or_default()
                        })
                    }}
                </text>
            </svg>
        </div>
    }
}

fn candle_color(candle: &Candle) -> Color {
    if candle.is_bullish() {
        Color::RISE
    } else if candle.is_bearish() {
        Color::FALL
    } else {
        Color::NEUTRAL
    }
}

/// `O 1,000 H 1,100 L 990 C 1,050 +5.00% V 12.3456`
fn price_info(candle: &Candle) -> String {
    let decimals = price_decimals(candle.trade_price.value());
    format!(
        "O {} H {} L {} C {} {:+.2}% V {}",
        format_price(candle.opening_price.value(), decimals),
        format_price(candle.high_price.value(), decimals),
        format_price(candle.low_price.value(), decimals),
        format_price(candle.trade_price.value(), decimals),
        candle.change_rate(),
        format_price(candle.candle_acc_trade_volume.value(), 4),
    )
}

fn candle_layer(history: &CandleHistory, viewport: &CandleViewState, scale: &PriceScale) -> View {
    let body_width = viewport.body_width();
    let inset = (viewport.option.candle_width - body_width) / 2.0;
    viewport.visible_range(history.len())
        .filter_map(|index| history.get(index).map(|candle| (index, candle)))
        .map(|(index, candle)| {
            let x = viewport.slot_x(index);
            let center = viewport.candle_center_x(index);
            let open_y = scale.price_to_y(candle.opening_price.value());
            let close_y = scale.price_to_y(candle.trade_price.value());
            let color = candle_color(candle).to_string();
            view! {
                <g class="candle">
                    <line
                        x1=center
                        x2=center
                        y1=scale.price_to_y(candle.high_price.value())
                        y2=scale.price_to_y(candle.low_price.value())
                        stroke=color.clone()
                    />
                    <rect
                        x=x + inset
                        y=open_y.min(close_y)
                        width=body_width
                        height=(open_y - close_y).abs().max(1.0)
                        fill=color
                    />
                </g>
            }
        })
        .collect_view()
}

fn volume_layer(history: &CandleHistory, viewport: &CandleViewState) -> View {
    let range = viewport.visible_range(history.len());
    let max_volume = history.max_volume(range.clone()).value();
    if max_volume <= 0.0 {
        return ().into_view();
    }
    let bottom = viewport.option.area_height();
    let height = viewport.option.volume_area_height();
    let body_width = viewport.body_width();
    let inset = (viewport.option.candle_width - body_width) / 2.0;
    range
        .filter_map(|index| history.get(index).map(|candle| (index, candle)))
        .map(|(index, candle)| {
            let bar = candle.candle_acc_trade_volume.value() / max_volume * height;
            view! {
                <rect
                    class="volume"
                    x=viewport.slot_x(index) + inset
                    y=bottom - bar
                    width=body_width
                    height=bar
                    fill=candle_color(candle).to_string()
                    opacity=0.4
                />
            }
        })
        .collect_view()
}

fn price_axis(viewport: &CandleViewState, scale: &PriceScale) -> View {
    let x = viewport.option.area_width();
    let decimals = decimals_for_step(tick_step(scale.min_price, scale.max_price, PRICE_TICK_COUNT));
    let axis = Color::AXIS.to_string();
    let ticks = scale
        .ticks()
        .into_iter()
        .map(|tick| {
            let y = scale.price_to_y(tick);
            view! {
                <line x1=0 x2=x y1=y y2=y stroke=axis.clone() stroke-opacity=0.2 />
                <text x=x + 6.0 y=y dominant-baseline="middle" font-size=AXIS_FONT_SIZE fill=axis.clone()>
                    {format_price(tick, decimals)}
                </text>
            }
        })
        .collect_view();
    view! {
        <g class="y-axis">
            <line x1=x x2=x y1=0 y2=viewport.option.area_height() stroke=axis.clone() />
            {ticks}
        </g>
    }
    .into_view()
}

fn time_axis(history: &CandleHistory, viewport: &CandleViewState, period: CandlePeriod) -> View {
    let y = viewport.option.area_height();
    let area_width = viewport.option.area_width();
    let stride = time_label_stride(viewport.option.candle_width);
    let axis = Color::AXIS.to_string();
    let labels = viewport
        .visible_range(history.len())
        .filter(|index| index % stride == 0)
        .filter_map(|index| {
            let x = viewport.candle_center_x(index);
            let candle = history.get(index)?;
            (0.0..=area_width).contains(&x).then(|| {
                view! {
                    <text x=x y=y + 16.0 text-anchor="middle" font-size=AXIS_FONT_SIZE fill=axis.clone()>
                        {format_time_label(&candle.candle_date_time_kst, period)}
                    </text>
                }
            })
        })
        .collect_view();
    view! {
        <g class="x-axis">
            <line x1=0 x2=area_width y1=y y2=y stroke=axis.clone() />
            {labels}
        </g>
    }
    .into_view()
}

fn current_price_marker(history: &CandleHistory, viewport: &CandleViewState, scale: &PriceScale) -> View {
    let Some(latest) = history.latest() else {
        return ().into_view();
    };
    let price = latest.trade_price.value();
    let y = scale.price_to_y(price);
    if !(0.0..=viewport.option.price_area_height()).contains(&y) {
        return ().into_view();
    }
    let x = viewport.option.area_width();
    let color = candle_color(latest).to_string();
    view! {
        <g class="current-price">
            <line x1=0 x2=x y1=y y2=y stroke=color.clone() stroke-dasharray="4 2" />
            <rect x=x y=y - 9.0 width=PRICE_AXIS_WIDTH height=18 fill=color />
            <text x=x + 6.0 y=y dominant-baseline="middle" font-size=AXIS_FONT_SIZE fill="#ffffff">
                {format_price(price, price_decimals(price))}
            </text>
        </g>
    }
    .into_view()
}

fn pointer_layer(
    pointer: &PointerData,
    history: &CandleHistory,
    viewport: &CandleViewState,
    scale: &PriceScale,
    period: CandlePeriod,
) -> Option<View> {
    let index = pointer.data_index.filter(|_| pointer.visible)?;
    let candle = history.get(index)?;
    let x = viewport.candle_center_x(index);
    let area_width = viewport.option.area_width();
    let area_height = viewport.option.area_height();
    let color = Color::CROSSHAIR.to_string();

    let price_label = (pointer.y <= viewport.option.price_area_height()).then(|| {
        let price = scale.y_to_price(pointer.y);
        view! {
            <line x1=0 x2=area_width y1=pointer.y y2=pointer.y stroke=color.clone() stroke-dasharray="3 3" />
            <rect x=area_width y=pointer.y - 9.0 width=PRICE_AXIS_WIDTH height=18 fill=color.clone() />
            <text x=area_width + 6.0 y=pointer.y dominant-baseline="middle" font-size=AXIS_FONT_SIZE fill="#ffffff">
                {format_price(price, price_decimals(price))}
            </text>
        }
    });

    Some(
        view! {
            <g class="pointer-ui" pointer-events="none">
                <line x1=x x2=x y1=0 y2=area_height stroke=color.clone() stroke-dasharray="3 3" />
                {price_label}
                <text x=x y=area_height + 16.0 text-anchor="middle" font-size=AXIS_FONT_SIZE fill=color>
                    {format_pointer_date(&candle.candle_date_time_kst, period)}
                </text>
            </g>
        }
        .into_view(),
    )
}
