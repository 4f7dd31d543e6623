use leptos::*;

use crate::domain::treemap::{CoinRateContent, convert_unit, place_pointer_tag};

pub const TAG_WIDTH: f64 = 168.0;
pub const TAG_HEIGHT: f64 = 76.0;
/// Gap between the pointer and the tag
pub const TAG_OFFSET: f64 = 12.0;

/// Hovered treemap tile and where the pointer is over the chart
#[derive(Debug, Clone, PartialEq)]
pub struct TilePointer {
    pub x: f64,
    pub y: f64,
    pub content: CoinRateContent,
}

/// Figures of the hovered coin, placed next to the pointer inside the chart.
#[component]
pub fn ChartTag(
    #[prop(into)] pointer: Signal<Option<TilePointer>>,
    #[prop(into)] chart_size: Signal<(f64, f64)>,
) -> impl IntoView {
    move || {
        let pointer = pointer.get()?;
        let (left, top) = place_pointer_tag((pointer.x, pointer.y), chart_size.get(), (TAG_WIDTH, TAG_HEIGHT), TAG_OFFSET);
        let content = pointer.content;
        let rate_class = if content.value > 0.0 {
            "rise"
        } else if content.value < 0.0 {
            "fall"
        } else {
            ""
        };
        let market_cap = if content.market_cap > 0.0 {
            format!("Cap {}", convert_unit(content.market_cap))
        } else {
            "Cap -".to_string()
        };
        Some(view! {
            <div
                class="chart-tag"
                style:left=format!("{left}px")
                style:top=format!("{top}px")
                style:width=format!("{TAG_WIDTH}px")
                style:height=format!("{TAG_HEIGHT}px")
            >
                <div class="chart-tag-title">{content.symbol().to_string()}</div>
                <div class=rate_class>{format!("{:+.2}%", content.value)}</div>
                <div>{format!("24h {}", convert_unit(content.acc_trade_price_24h))}</div>
                <div>{market_cap}</div>
            </div>
        })
    }
}
