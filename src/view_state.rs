use crate::domain::chart::{CANDLE_BODY_RATIO, CandleRenderOption};

/// Candles kept in reserve past the left edge before older history is requested
pub const HISTORY_PRELOAD_THRESHOLD: usize = 20;

/// Whether the remaining off-screen history is low enough to request more.
pub fn should_fetch_history(remaining: usize) -> bool {
    remaining < HISTORY_PRELOAD_THRESHOLD
}

/// `offset` folded into `[0, width)`; rounding up to `width` folds to 0.
fn wrap_offset(offset: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return 0.0;
    }
    let wrapped = offset.rem_euclid(width);
    if wrapped >= width { 0.0 } else { wrapped }
}

/// Viewport window over a newest-first candle array.
///
/// Panning only moves the candle group by `translate_x`; whole candle widths
/// are carried into `render_start_index` so the offset stays inside
/// `[0, candle_width)`.
#[derive(Clone, Debug, PartialEq)]
pub struct CandleViewState {
    pub option: CandleRenderOption,
    pub translate_x: f64,
}

impl CandleViewState {
    pub fn new(option: CandleRenderOption) -> Self {
        Self { option, translate_x: 0.0 }
    }

    /// Move the candle group by `delta_px`; positive reveals older candles.
    pub fn pan(&mut self, delta_px: f64, candle_count: usize) {
        let width = self.option.candle_width;
        let translate = self.translate_x + delta_px;
        let start = self.option.render_start_index;

        if translate < 0.0 && start == 0 {
            self.translate_x = 0.0;
            return;
        }
        if (0.0..width).contains(&translate) {
            self.translate_x = translate;
            return;
        }

        let shift = (translate / width).floor() as i64;
        let shifted = start as i64 + shift;
        let max_start = candle_count.saturating_sub(1) as i64;
        if shifted < 0 {
            self.option.render_start_index = 0;
            self.translate_x = 0.0;
        } else if shifted > max_start {
            self.option.render_start_index = max_start as usize;
            self.translate_x = 0.0;
        } else {
            self.option.render_start_index = shifted as usize;
            self.translate_x = wrap_offset(translate, width);
        }
    }

    /// Zoom by `delta_px` of candle width; the pixel offset scales along.
    pub fn zoom(&mut self, delta_px: f64) {
        let factor = self.option.zoom(delta_px);
        self.translate_x = wrap_offset((self.translate_x * factor).max(0.0), self.option.candle_width);
    }

    /// Back to the newest candles at `candle_width`, keeping the size.
    pub fn reset(&mut self, candle_width: f64) {
        let option = &self.option;
        self.option = CandleRenderOption::with_bounds(
            option.width,
            option.height,
            option.min_candle_width,
            candle_width,
            option.max_candle_width,
        );
        self.translate_x = 0.0;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.option = self.option.for_window(width, height);
    }

    /// `[start, end)` of the data to draw, one extra candle for the partial left edge.
    pub fn visible_range(&self, candle_count: usize) -> std::ops::Range<usize> {
        let start = self.option.render_start_index.min(candle_count);
        let end = (start + self.option.render_candle_count + 1).min(candle_count);
        start..end
    }

    /// Candles loaded beyond the left edge of the window
    pub fn remaining_history(&self, candle_count: usize) -> usize {
        candle_count.saturating_sub(self.visible_range(candle_count).end)
    }

    /// Left edge of the slot for `data_index`, in plot coordinates.
    pub fn slot_x(&self, data_index: usize) -> f64 {
        let offset = data_index as f64 - self.option.render_start_index as f64 + 1.0;
        self.option.area_width() - offset * self.option.candle_width + self.translate_x
    }

    pub fn candle_center_x(&self, data_index: usize) -> f64 {
        self.slot_x(data_index) + self.option.candle_width / 2.0
    }

    pub fn body_width(&self) -> f64 {
        (self.option.candle_width * CANDLE_BODY_RATIO).max(1.0)
    }

    /// Data index under plot x coordinate `x`, if any candle is loaded there.
    pub fn index_at(&self, x: f64, candle_count: usize) -> Option<usize> {
        let area = self.option.area_width();
        if !(0.0..=area).contains(&x) || self.option.candle_width <= 0.0 {
            return None;
        }
        let offset = ((area + self.translate_x - x) / self.option.candle_width).floor();
        let index = self.option.render_start_index + offset as usize;
        (index < candle_count).then_some(index)
    }

    /// Keep the view on the same candles after `added` newer ones were prepended.
    pub fn shift_for_prepended(&mut self, added: usize) {
        if self.option.render_start_index > 0 || self.translate_x > 0.0 {
            self.option.render_start_index += added;
        }
    }

    pub fn needs_fetch(&self, candle_count: usize, exhausted: bool) -> bool {
        candle_count > 0 && !exhausted && should_fetch_history(self.remaining_history(candle_count))
    }
}
