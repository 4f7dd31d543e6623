use crate::domain::chart::Color;

/// Light to strong red for rising coins
pub const RISE_RAMP: [Color; 5] = [
    Color::from_hex(0xf4a6a0),
    Color::from_hex(0xeb7b72),
    Color::from_hex(0xdf5247),
    Color::from_hex(0xc62f26),
    Color::from_hex(0x9e1a14),
];

/// Light to strong blue for falling coins
pub const FALL_RAMP: [Color; 5] = [
    Color::from_hex(0x9ec5f2),
    Color::from_hex(0x6fa5e8),
    Color::from_hex(0x4384d9),
    Color::from_hex(0x2262bd),
    Color::from_hex(0x114394),
];

/// Map `value` in `[0, max]` onto one of `range`'s equal-width buckets.
pub fn quantize(max: f64, value: f64, range: &[Color]) -> Color {
    let Some(&last) = range.last() else {
        return Color::NEUTRAL;
    };
    if max <= 0.0 || !value.is_finite() {
        return range[0];
    }
    let bucket = (range.len() as f64 * value / max).floor();
    if bucket < 0.0 {
        range[0]
    } else if bucket as usize >= range.len() {
        last
    } else {
        range[bucket as usize]
    }
}

/// Fill colors for change rates, scaled separately for gains and losses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChangeRateColorScale {
    pub max_rise: f64,
    pub max_fall: f64,
}

impl ChangeRateColorScale {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values.into_iter().fold(Self { max_rise: 0.0, max_fall: 0.0 }, |scale, v| Self {
            max_rise: scale.max_rise.max(v),
            max_fall: scale.max_fall.max(-v),
        })
    }

    pub fn color(&self, value: f64) -> Color {
        if value > 0.0 {
            quantize(self.max_rise, value, &RISE_RAMP)
        } else if value < 0.0 {
            quantize(self.max_fall, -value, &FALL_RAMP)
        } else {
            Color::NEUTRAL
        }
    }
}
