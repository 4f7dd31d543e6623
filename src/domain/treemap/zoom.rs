/// Allowed zoom scale range
pub const SCALE_EXTENT: (f64, f64) = (1.0, 30.0);

/// Pan/zoom state of the treemap: screen = translate + k * content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTransform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    pub const IDENTITY: ZoomTransform = ZoomTransform { x: 0.0, y: 0.0, k: 1.0 };

    pub fn apply(&self, point: (f64, f64)) -> (f64, f64) {
        (self.x + self.k * point.0, self.y + self.k * point.1)
    }

    pub fn invert(&self, point: (f64, f64)) -> (f64, f64) {
        ((point.0 - self.x) / self.k, (point.1 - self.y) / self.k)
    }

    /// SVG `transform` attribute value
    pub fn to_svg(&self) -> String {
        format!("translate({}, {}) scale({}, {})", self.x, self.y, self.k, self.k)
    }

    /// Scale by `factor` keeping the content under screen point `anchor` fixed.
    pub fn scale_by(self, factor: f64, anchor: (f64, f64), width: f64, height: f64) -> Self {
        let k = (self.k * factor).clamp(SCALE_EXTENT.0, SCALE_EXTENT.1);
        let content = self.invert(anchor);
        let scaled = Self { x: anchor.0 - content.0 * k, y: anchor.1 - content.1 * k, k };
        scaled.constrain(width, height)
    }

    /// Move by a screen-space delta.
    pub fn translate_by(self, dx: f64, dy: f64, width: f64, height: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..self }.constrain(width, height)
    }

    /// Keep the visible area inside the content box `[0, width] x [0, height]`.
    pub fn constrain(self, width: f64, height: f64) -> Self {
        let (left, top) = self.invert((0.0, 0.0));
        let (right, bottom) = self.invert((width, height));
        let dx0 = left;
        let dx1 = right - width;
        let dy0 = top;
        let dy1 = bottom - height;
        let tx = if dx1 > dx0 { (dx0 + dx1) / 2.0 } else { shift_inside(dx0, dx1) };
        let ty = if dy1 > dy0 { (dy0 + dy1) / 2.0 } else { shift_inside(dy0, dy1) };
        Self { x: self.x + self.k * tx, y: self.y + self.k * ty, k: self.k }
    }
}

fn shift_inside(near: f64, far: f64) -> f64 {
    let pull = near.min(0.0);
    if pull != 0.0 { pull } else { far.max(0.0) }
}

/// Zoom factor for a wheel event, `2^(-deltaY * unit)`.
///
/// `delta_mode` follows `WheelEvent.deltaMode`: 0 pixels, 1 lines, 2 pages.
pub fn wheel_zoom_factor(delta_y: f64, delta_mode: u32, ctrl_key: bool) -> f64 {
    let unit = match delta_mode {
        0 => 0.002,
        1 => 0.05,
        _ => 1.0,
    };
    let boost = if ctrl_key { 10.0 } else { 1.0 };
    2f64.powf(-delta_y * unit * boost)
}
