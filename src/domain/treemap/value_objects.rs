use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::chart::Color;
use crate::domain::market_data::Market;

/// Id of the synthetic root every coin hangs under
pub const ROOT_NAME: &str = "Origin";

/// One node of the treemap input: a coin, or the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinRateContent {
    /// Unique id inside the hierarchy
    pub name: String,
    /// Market code, empty for the root
    pub ticker: String,
    pub parent: String,
    /// 24h change rate in percent
    pub value: f64,
    pub acc_trade_price_24h: f64,
    pub market_cap: f64,
    /// `u32::MAX` when the rank is unknown
    pub cmc_rank: u32,
}

impl CoinRateContent {
    pub fn root() -> Self {
        Self {
            name: ROOT_NAME.to_string(),
            ticker: String::new(),
            parent: String::new(),
            value: 0.0,
            acc_trade_price_24h: 0.0,
            market_cap: 0.0,
            cmc_rank: u32::MAX,
        }
    }

    pub fn is_root(&self) -> bool {
        self.name == ROOT_NAME
    }

    /// Coin symbol from the ticker, e.g. `BTC` for `KRW-BTC`
    pub fn symbol(&self) -> &str {
        self.ticker.split_once('-').map(|(_, base)| base).unwrap_or(&self.ticker)
    }

    pub fn market(&self) -> Option<Market> {
        Market::new(&self.ticker).ok()
    }
}

/// What tile area and order are based on
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum SortKind {
    #[strum(serialize = "change rate")]
    #[serde(rename = "change rate")]
    ChangeRate,
    #[strum(serialize = "change rate(absolute)")]
    #[serde(rename = "change rate(absolute)")]
    ChangeRateAbsolute,
    #[strum(serialize = "trade price")]
    #[serde(rename = "trade price")]
    TradePrice,
    #[default]
    #[strum(serialize = "market capitalization")]
    #[serde(rename = "market capitalization")]
    MarketCap,
}

/// Axis-aligned rectangle, `x0 <= x1`, `y0 <= y1`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x0 + self.width().abs() / 2.0, self.y0 + self.height().abs() / 2.0)
    }
}

/// A laid-out coin ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapTile {
    pub data: CoinRateContent,
    pub rect: Rect,
    pub fill: Color,
    pub title: String,
    pub subtitle: String,
    pub font_size: f64,
}

impl TreemapTile {
    /// Identity of the coin across layouts; a re-layout moves the tile with this key.
    pub fn key(&self) -> &str {
        &self.data.name
    }

    /// CSS `transform` moving the tile's local origin to its top-left corner
    pub fn css_translate(&self) -> String {
        format!("translate({}px, {}px)", self.rect.x0, self.rect.y0)
    }

    /// Label anchor relative to the top-left corner
    pub fn local_center(&self) -> (f64, f64) {
        (self.rect.width().max(0.0) / 2.0, self.rect.height().max(0.0) / 2.0)
    }

    /// Label as two lines, `SYMBOL\ntext`
    pub fn label(&self) -> String {
        format!("{}\n{}", self.title, self.subtitle)
    }
}
