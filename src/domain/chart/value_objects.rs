use derive_more::Display;

use crate::domain::market_data::{CandlePeriod, Market};

/// Width reserved on the right for the price axis
pub const PRICE_AXIS_WIDTH: f64 = 72.0;
/// Height reserved at the bottom for the time axis
pub const TIME_AXIS_HEIGHT: f64 = 24.0;
/// Share of the plot height given to volume bars
pub const VOLUME_AREA_RATIO: f64 = 0.2;
pub const DEFAULT_CANDLE_WIDTH: f64 = 10.0;
pub const MIN_CANDLE_WIDTH: f64 = 4.0;
pub const MAX_CANDLE_WIDTH: f64 = 40.0;
/// Fraction of a candle slot occupied by the body
pub const CANDLE_BODY_RATIO: f64 = 0.8;

/// Value Object - which series the candle chart shows
#[derive(Debug, Clone, PartialEq, Eq, Default, Display)]
#[display(fmt = "{}@{}", market, period)]
pub struct CandleChartOption {
    pub period: CandlePeriod,
    pub market: Market,
}

impl CandleChartOption {
    pub fn new(period: CandlePeriod, market: Market) -> Self {
        Self { period, market }
    }
}

/// Value Object - everything that decides which candles are drawn and how wide.
#[derive(Debug, Clone, PartialEq)]
pub struct CandleRenderOption {
    /// Data index of the rightmost visible candle (0 is the newest)
    pub render_start_index: usize,
    pub render_candle_count: usize,
    pub candle_width: f64,
    pub min_candle_width: f64,
    pub max_candle_width: f64,
    /// Whole svg size, axes included
    pub width: f64,
    pub height: f64,
}

impl CandleRenderOption {
    pub fn initial(width: f64, height: f64) -> Self {
        Self::with_bounds(width, height, MIN_CANDLE_WIDTH, DEFAULT_CANDLE_WIDTH, MAX_CANDLE_WIDTH)
    }

    pub fn with_bounds(width: f64, height: f64, min: f64, default: f64, max: f64) -> Self {
        let mut option = Self {
            render_start_index: 0,
            render_candle_count: 0,
            candle_width: default.clamp(min, max),
            min_candle_width: min,
            max_candle_width: max,
            width: width.max(0.0),
            height: height.max(0.0),
        };
        option.render_candle_count = option.count_for_width();
        option
    }

    /// Same option adapted to a new svg size; the start index is kept.
    pub fn for_window(&self, width: f64, height: f64) -> Self {
        let mut option = Self { width: width.max(0.0), height: height.max(0.0), ..self.clone() };
        option.render_candle_count = option.count_for_width();
        option
    }

    /// Plot area width, price axis excluded
    pub fn area_width(&self) -> f64 {
        (self.width - PRICE_AXIS_WIDTH).max(0.0)
    }

    /// Plot area height, time axis excluded
    pub fn area_height(&self) -> f64 {
        (self.height - TIME_AXIS_HEIGHT).max(0.0)
    }

    pub fn price_area_height(&self) -> f64 {
        self.area_height() * (1.0 - VOLUME_AREA_RATIO)
    }

    pub fn volume_area_height(&self) -> f64 {
        self.area_height() * VOLUME_AREA_RATIO
    }

    fn count_for_width(&self) -> usize {
        if self.candle_width <= 0.0 {
            return 0;
        }
        (self.area_width() / self.candle_width).ceil() as usize
    }

    /// Grow or shrink candles by `delta` pixels, keeping the right edge anchored.
    ///
    /// Returns the applied scale factor.
    pub fn zoom(&mut self, delta: f64) -> f64 {
        let old = self.candle_width;
        self.candle_width = (old + delta).clamp(self.min_candle_width, self.max_candle_width);
        self.render_candle_count = self.count_for_width();
        self.candle_width / old
    }
}

/// Value Object - pointer state over the candle chart
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerData {
    pub x: f64,
    pub y: f64,
    /// Hovered candle, if the pointer is over loaded data
    pub data_index: Option<usize>,
    pub visible: bool,
}

impl PointerData {
    pub const HIDDEN: PointerData = PointerData { x: 0.0, y: 0.0, data_index: None, visible: false };
}

/// Value Object - RGB color rendered as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display(fmt = "#{:02x}{:02x}{:02x}", r, g, b)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Self { r: ((hex >> 16) & 0xFF) as u8, g: ((hex >> 8) & 0xFF) as u8, b: (hex & 0xFF) as u8 }
    }

    /// Rising candles, Korean exchange convention
    pub const RISE: Color = Color::from_hex(0xd24f45);
    pub const FALL: Color = Color::from_hex(0x1261c4);
    pub const NEUTRAL: Color = Color::from_hex(0x808080);
    pub const AXIS: Color = Color::from_hex(0x9e9e9e);
    pub const CROSSHAIR: Color = Color::from_hex(0x424242);
}
