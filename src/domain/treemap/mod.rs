//! Treemap aggregate: coin hierarchy, squarified layout, colors and zoom.

pub mod color;
pub mod hierarchy;
pub mod layout;
pub mod value_objects;
pub mod zoom;

pub use color::*;
pub use hierarchy::*;
pub use layout::*;
pub use value_objects::*;
pub use zoom::*;

use std::cmp::Ordering;

use crate::domain::chart::format_price;
use crate::domain::errors::LayoutResult;

/// Weight floor so that every coin keeps a visible tile
pub const MIN_TILE_WEIGHT: f64 = 0.1;
/// Label font size is the tile width divided by this
pub const FONT_SIZE_DIVISOR: f64 = 9.0;

/// Tile weight of a record under `sort`; the root weighs nothing.
pub fn tile_weight(content: &CoinRateContent, sort: SortKind) -> f64 {
    if content.is_root() {
        return 0.0;
    }
    let raw = match sort {
        SortKind::ChangeRate | SortKind::ChangeRateAbsolute => content.value,
        SortKind::TradePrice => content.acc_trade_price_24h,
        SortKind::MarketCap => content.market_cap,
    };
    MIN_TILE_WEIGHT.max(raw.abs())
}

/// Sibling order under `sort`: descending figures, or ascending rank.
pub fn compare_contents(a: &CoinRateContent, b: &CoinRateContent, sort: SortKind) -> Ordering {
    let descending = |x: f64, y: f64| y.partial_cmp(&x).unwrap_or(Ordering::Equal);
    match sort {
        SortKind::ChangeRate => descending(a.value, b.value),
        SortKind::ChangeRateAbsolute => descending(a.value.abs(), b.value.abs()),
        SortKind::TradePrice => descending(a.acc_trade_price_24h, b.acc_trade_price_24h),
        SortKind::MarketCap => a.cmc_rank.cmp(&b.cmc_rank),
    }
}

/// Korean unit notation for large KRW amounts, e.g. `1.23조`, `4,567억`
pub fn convert_unit(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1e12 {
        format!("{sign}{}조", format_price(abs / 1e12, 2))
    } else if abs >= 1e8 {
        format!("{sign}{}억", format_price(abs / 1e8, 0))
    } else if abs >= 1e4 {
        format!("{sign}{}만", format_price(abs / 1e4, 0))
    } else {
        format!("{sign}{}", format_price(abs, 0))
    }
}

/// Second label line for a tile under `sort`
pub fn tile_text(content: &CoinRateContent, sort: SortKind) -> String {
    match sort {
        SortKind::ChangeRate | SortKind::ChangeRateAbsolute => format!("{:.2}%", content.value),
        SortKind::TradePrice => convert_unit(content.acc_trade_price_24h),
        SortKind::MarketCap => convert_unit(content.market_cap),
    }
}

/// Stratify, weigh, sort and lay out `data` into drawable tiles.
///
/// `data` must contain the `Origin` root; the root itself is never drawn.
pub fn build_treemap(
    data: Vec<CoinRateContent>,
    width: f64,
    height: f64,
    sort: SortKind,
) -> LayoutResult<Vec<TreemapTile>> {
    let colors = ChangeRateColorScale::from_values(data.iter().filter(|d| !d.is_root()).map(|d| d.value));

    let mut hierarchy = Hierarchy::stratify(data, |d| d.name.clone(), |d| d.parent.clone())?;
    hierarchy
        .sum(|d| tile_weight(d, sort))
        .sort_by(|a, b| compare_contents(&a.data, &b.data, sort));
    TreemapLayout::new(width, height).apply(&mut hierarchy);

    let tiles = hierarchy
        .leaves()
        .into_iter()
        .filter(|node| !node.data.is_root())
        .map(|node| TreemapTile {
            fill: colors.color(node.data.value),
            title: node.data.symbol().to_string(),
            subtitle: tile_text(&node.data, sort),
            font_size: (node.rect.width() / FONT_SIZE_DIVISOR).max(0.0),
            rect: node.rect,
            data: node.data.clone(),
        })
        .collect();
    Ok(tiles)
}

/// Position of the pointer tag so it stays inside the chart.
///
/// The tag sits below-right of the pointer and flips to the other side when
/// the pointer is past the middle of the chart on that axis.
pub fn place_pointer_tag(
    pointer: (f64, f64),
    chart: (f64, f64),
    tag: (f64, f64),
    offset: f64,
) -> (f64, f64) {
    let x = if pointer.0 > chart.0 / 2.0 { pointer.0 - tag.0 - offset } else { pointer.0 + offset };
    let y = if pointer.1 > chart.1 / 2.0 { pointer.1 - tag.1 - offset } else { pointer.1 + offset };
    (x.clamp(0.0, (chart.0 - tag.0).max(0.0)), y.clamp(0.0, (chart.1 - tag.1).max(0.0)))
}
