use crate::domain::market_data::{CandleHistory, Price};

/// Minimum horizontal room for one time label
pub const TIME_LABEL_MIN_SPACING: f64 = 64.0;
/// Vertical padding around the visible price range
pub const PRICE_PADDING_RATIO: f64 = 0.1;
pub const PRICE_TICK_COUNT: usize = 6;

/// Linear mapping from price to y inside the price area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceScale {
    pub min_price: f64,
    pub max_price: f64,
    pub height: f64,
}

impl PriceScale {
    pub fn new(low: Price, high: Price, height: f64) -> Self {
        let (low, high) = (low.value(), high.value());
        let range = high - low;
        let padding = if range > 0.0 {
            range * PRICE_PADDING_RATIO
        } else {
            (high.abs() * 0.01).max(1.0)
        };
        Self { min_price: low - padding, max_price: high + padding, height }
    }

    /// Scale for the visible slice of `history`, `None` when nothing is visible.
    pub fn for_range(history: &CandleHistory, range: std::ops::Range<usize>, height: f64) -> Option<Self> {
        history.price_range(range).map(|(low, high)| Self::new(low, high, height))
    }

    pub fn price_range(&self) -> f64 {
        self.max_price - self.min_price
    }

    pub fn price_to_y(&self, price: f64) -> f64 {
        if self.price_range() == 0.0 {
            return self.height / 2.0;
        }
        let normalized = (price - self.min_price) / self.price_range();
        self.height * (1.0 - normalized)
    }

    pub fn y_to_price(&self, y: f64) -> f64 {
        if self.height == 0.0 {
            return self.min_price;
        }
        let normalized = 1.0 - y / self.height;
        self.min_price + self.price_range() * normalized
    }

    pub fn ticks(&self) -> Vec<f64> {
        linear_ticks(self.min_price, self.max_price, PRICE_TICK_COUNT)
    }
}

/// Step of a "nice" tick sequence: 1, 2 or 5 times a power of ten.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let raw = (stop - start).abs() / count.max(1) as f64;
    if raw <= 0.0 || !raw.is_finite() {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Evenly spaced round values within `[start, stop]`.
pub fn linear_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let step = tick_step(start, stop, count);
    if step == 0.0 {
        return if start == stop { vec![start] } else { Vec::new() };
    }
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Decimals needed to tell ticks `step` apart
pub fn decimals_for_step(step: f64) -> usize {
    if step <= 0.0 || step >= 1.0 {
        0
    } else {
        (-step.log10().floor()) as usize
    }
}

/// Price with thousands separators, e.g. `12,345,000` or `0.0012`
pub fn format_price(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (formatted, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 && formatted_nonzero(&grouped, frac_part.as_deref()) { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn formatted_nonzero(int_part: &str, frac: Option<&str>) -> bool {
    int_part.chars().chain(frac.unwrap_or("").chars()).any(|c| c.is_ascii_digit() && c != '0')
}

/// Decimals to show for a traded price; sub-unit coins get more.
pub fn price_decimals(price: f64) -> usize {
    match price.abs() {
        p if p >= 100.0 => 0,
        p if p >= 1.0 => 2,
        p if p >= 0.01 => 4,
        _ => 6,
    }
}

/// Every how many candles a time label fits
pub fn time_label_stride(candle_width: f64) -> usize {
    if candle_width <= 0.0 {
        return 1;
    }
    (TIME_LABEL_MIN_SPACING / candle_width).ceil().max(1.0) as usize
}
