//! Treemap of the configured coins with wheel zoom, drag pan and hover tags.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Interval;
use leptos::{html::Div, *};
use web_sys::{PointerEvent, WheelEvent};

use crate::{
    application::MarketOverviewUseCase,
    domain::{
        logging::LogComponent,
        market_data::Market,
        treemap::{TreemapTile, ZoomTransform, build_treemap, wheel_zoom_factor},
    },
    event_utils::{EventListenerHandle, EventOptions, event_listener_with_options, window_event_listener_with_options},
    global_state::{coin_contents, dashboard_config, is_mobile, selected_market, sort_kind},
    infrastructure::http::UpbitRestClient,
    presentation::chart_tag::{ChartTag, TilePointer},
};

/// Pointer travel in px after which a press counts as a drag, not a click
const CLICK_SLOP: f64 = 3.0;
const HOVER_OPACITY: f64 = 0.7;

type OverviewUseCase = MarketOverviewUseCase<UpbitRestClient>;

fn load_overview(use_case: Rc<OverviewUseCase>, markets: Vec<Market>) {
    spawn_local(async move {
        match use_case.execute(&markets).await {
            Ok(contents) => {
                coin_contents().try_update(|c| *c = contents);
            }
            Err(e) => crate::log_error!(LogComponent::Presentation("TreeChart"), "❌ Market overview failed: {e}"),
        }
    });
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    last: (f64, f64),
    travelled: f64,
}

#[component]
pub fn TreeChart() -> impl IntoView {
    let config = dashboard_config().get_untracked();
    // one use case for the component's lifetime so market caps are loaded once
    let overview = store_value(Rc::new(MarketOverviewUseCase::new(UpbitRestClient::new(
        &config.api_base,
        config.market_cap_url.clone(),
    ))));
    let markets = store_value(config.market_list());

    let size = create_rw_signal((0.0_f64, 0.0_f64));
    let transform = create_rw_signal(ZoomTransform::IDENTITY);
    let hovered = create_rw_signal(None::<TilePointer>);
    let drag = store_value(None::<DragState>);
    let suppress_click = store_value(false);
    let container = create_node_ref::<Div>();

    load_overview(overview.get_value(), markets.get_value());
    let refresh = Interval::new(config.refresh_interval_ms, move || {
        load_overview(overview.get_value(), markets.get_value());
    });

    let tiles = create_memo(move |_| {
        let (width, height) = size.get();
        if width <= 0.0 || height <= 0.0 {
            return Vec::new();
        }
        let sort = sort_kind().get();
        coin_contents().with(|contents| {
            if contents.len() < 2 {
                return Vec::new();
            }
            build_treemap(contents.clone(), width, height, sort).unwrap_or_else(|e| {
                crate::log_error!(LogComponent::Presentation("TreeChart"), "❌ {e}");
                Vec::new()
            })
        })
    });

    let listeners: Rc<RefCell<Vec<EventListenerHandle>>> = Rc::default();
    let measure = move || {
        if let Some(el) = container.get_untracked() {
            let rect = el.get_bounding_client_rect();
            let (width, height) = (rect.width(), rect.height());
            size.set((width, height));
            transform.update(|t| *t = t.constrain(width, height));
            hovered.set(None);
        }
    };
    let local_point = move |client_x: i32, client_y: i32| -> Option<(f64, f64)> {
        let rect = container.get_untracked()?.get_bounding_client_rect();
        Some((client_x as f64 - rect.left(), client_y as f64 - rect.top()))
    };
    {
        let listeners = Rc::clone(&listeners);
        container.on_load(move |el| {
            request_animation_frame(measure);
            let handle = event_listener_with_options(&el, ev::wheel, &EventOptions::active(), move |e: WheelEvent| {
                e.prevent_default();
                let Some(anchor) = local_point(e.client_x(), e.client_y()) else {
                    return;
                };
                let factor = wheel_zoom_factor(e.delta_y(), e.delta_mode(), e.ctrl_key());
                let (width, height) = size.get_untracked();
                transform.update(|t| *t = t.scale_by(factor, anchor, width, height));
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

    let on_pointer_down = move |e: PointerEvent| {
        if let Some(last) = local_point(e.client_x(), e.client_y()) {
            drag.set_value(Some(DragState { last, travelled: 0.0 }));
            suppress_click.set_value(false);
        }
    };
    let on_pointer_move = move |e: PointerEvent| {
        let Some((x, y)) = local_point(e.client_x(), e.client_y()) else {
            return;
        };
        if let Some(state) = drag.get_value() {
            let (dx, dy) = (x - state.last.0, y - state.last.1);
            let travelled = state.travelled + dx.hypot(dy);
            drag.set_value(Some(DragState { last: (x, y), travelled }));
            if travelled > CLICK_SLOP {
                suppress_click.set_value(true);
                let (width, height) = size.get_untracked();
                transform.update(|t| *t = t.translate_by(dx, dy, width, height));
            }
        }
        if hovered.with_untracked(Option::is_some) {
            hovered.update(|h| {
                if let Some(pointer) = h {
                    pointer.x = x;
                    pointer.y = y;
                }
            });
        }
    };
    let end_drag = move |_: PointerEvent| drag.set_value(None);
    let on_pointer_leave = move |_: PointerEvent| {
        drag.set_value(None);
        hovered.set(None);
    };

    // keyed by coin: a new layout updates the tile in place so its geometry can transition
    let render_tile = move |key: String| {
        let tile = create_memo({
            let key = key.clone();
            move |_| tiles.with(|tiles| tiles.iter().find(|t| t.key() == key).cloned())
        });
        let attr = move |f: fn(&TreemapTile) -> String| move || tile.with(|t| t.as_ref().map(f).unwrap_or_default());
        let is_hovered = {
            let key = key.clone();
            move || !is_mobile().get() && hovered.with(|h| h.as_ref().is_some_and(|p| p.content.name == key))
        };
        let on_move = move |e: PointerEvent| {
            if is_mobile().get_untracked() {
                return;
            }
            let Some((x, y)) = local_point(e.client_x(), e.client_y()) else {
                return;
            };
            if hovered.with_untracked(|h| h.as_ref().is_some_and(|p| p.content.name == key)) {
                return;
            }
            if let Some(content) = tile.with_untracked(|t| t.as_ref().map(|t| t.data.clone())) {
                hovered.set(Some(TilePointer { x, y, content }));
            }
        };
        let on_click = move |_: web_sys::MouseEvent| {
            if suppress_click.get_value() {
                return;
            }
            if let Some(market) = tile.with_untracked(|t| t.as_ref().and_then(|t| t.data.market())) {
                crate::log_info!(LogComponent::Presentation("TreeChart"), "🖱️ Opening {market}");
                selected_market().set(market);
            }
        };
        view! {
            <g
                class="tile"
                style:opacity=move || if is_hovered() { HOVER_OPACITY.to_string() } else { "1".to_string() }
                style:transform=attr(TreemapTile::css_translate)
                on:pointermove=on_move
                on:pointerleave=move |_| hovered.set(None)
                on:click=on_click
            >
                <rect
                    width=attr(|t| t.rect.width().max(0.0).to_string())
                    height=attr(|t| t.rect.height().max(0.0).to_string())
                    style:fill=attr(|t| t.fill.to_string())
                    stroke="gray"
                />
                <text
                    x=attr(|t| t.local_center().0.to_string())
                    y=attr(|t| t.local_center().1.to_string())
                    text-anchor="middle"
                    fill="white"
                    font-size=attr(|t| format!("{}px", t.font_size))
                >
                    <tspan x=attr(|t| t.local_center().0.to_string()) dy="-0.1em">
                        {attr(|t| t.title.clone())}
                    </tspan>
                    <tspan x=attr(|t| t.local_center().0.to_string()) dy="1.2em">
                        {attr(|t| t.subtitle.clone())}
                    </tspan>
                </text>
            </g>
        }
    };

    view! {
        <div
            class="tree-chart"
            node_ref=container
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=end_drag
            on:pointerleave=on_pointer_leave
        >
            <svg width=move || size.get().0 height=move || size.get().1>
                <g transform=move || transform.get().to_svg()>
                    <For
                        each=move || tiles.get()
                        key=|tile| tile.key().to_string()
                        children=move |tile: TreemapTile| render_tile(tile.key().to_string())
                    />
                </g>
            </svg>
            <ChartTag pointer=hovered chart_size=size />
        </div>
    }
}
