use super::hierarchy::Hierarchy;
use super::value_objects::Rect;

/// Target aspect ratio of squarified rows
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;
/// Gap between siblings and around each parent's content
pub const TREEMAP_PADDING: f64 = 4.0;

/// Squarified treemap layout with uniform inner and outer padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreemapLayout {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub ratio: f64,
}

impl TreemapLayout {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, padding: TREEMAP_PADDING, ratio: GOLDEN_RATIO }
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Position every node of a summed hierarchy.
    pub fn apply<T>(&self, hierarchy: &mut Hierarchy<T>) {
        let root = hierarchy.root();
        hierarchy.node_mut(root).rect = Rect::new(0.0, 0.0, self.width.max(0.0), self.height.max(0.0));

        // padding already applied to a node's content box, by depth
        let mut padding_stack: Vec<f64> = vec![0.0];
        for index in hierarchy.pre_order() {
            let depth = hierarchy.node(index).depth;
            let p = padding_stack.get(depth).copied().unwrap_or(0.0);
            let r = hierarchy.node(index).rect;
            let rect = collapse(Rect::new(r.x0 + p, r.y0 + p, r.x1 - p, r.y1 - p));
            hierarchy.node_mut(index).rect = rect;

            if hierarchy.node(index).children.is_empty() {
                continue;
            }
            let half_inner = self.padding / 2.0;
            if padding_stack.len() <= depth + 1 {
                padding_stack.resize(depth + 2, 0.0);
            }
            padding_stack[depth + 1] = half_inner;
            let outer = self.padding - half_inner;
            let content = collapse(Rect::new(
                rect.x0 + outer,
                rect.y0 + outer,
                rect.x1 - outer,
                rect.y1 - outer,
            ));
            self.squarify(hierarchy, index, content);
        }
    }

    fn squarify<T>(&self, hierarchy: &mut Hierarchy<T>, parent: usize, area: Rect) {
        let children = hierarchy.node(parent).children.clone();
        let values: Vec<f64> = children.iter().map(|&c| hierarchy.node(c).value).collect();
        let n = children.len();
        let mut remaining: f64 = hierarchy.node(parent).value;
        let (mut x0, mut y0, x1, y1) = (area.x0, area.y0, area.x1, area.y1);
        let mut i0 = 0;

        while i0 < n {
            let dx = x1 - x0;
            let dy = y1 - y0;
            let mut i1 = i0;

            // next non-empty node
            let mut sum_value;
            loop {
                sum_value = values[i1];
                i1 += 1;
                if sum_value != 0.0 || i1 >= n {
                    break;
                }
            }
            let mut min_value = sum_value;
            let mut max_value = sum_value;
            let alpha = aspect(dx, dy) / (remaining * self.ratio);
            let mut beta = sum_value * sum_value * alpha;
            let mut min_ratio = (max_value / beta).max(beta / min_value);

            // grow the row while the worst aspect ratio does not get worse
            while i1 < n {
                let node_value = values[i1];
                sum_value += node_value;
                min_value = min_value.min(node_value);
                max_value = max_value.max(node_value);
                beta = sum_value * sum_value * alpha;
                let new_ratio = (max_value / beta).max(beta / min_value);
                if new_ratio > min_ratio {
                    sum_value -= node_value;
                    break;
                }
                min_ratio = new_ratio;
                i1 += 1;
            }

            let row = &children[i0..i1];
            if dx < dy {
                let row_y1 = if remaining != 0.0 { y0 + dy * sum_value / remaining } else { y1 };
                dice(hierarchy, row, sum_value, Rect::new(x0, y0, x1, row_y1));
                y0 = row_y1;
            } else {
                let row_x1 = if remaining != 0.0 { x0 + dx * sum_value / remaining } else { x1 };
                slice(hierarchy, row, sum_value, Rect::new(x0, y0, row_x1, y1));
                x0 = row_x1;
            }
            remaining -= sum_value;
            i0 = i1;
        }
    }
}

/// `max(dy/dx, dx/dy)`, infinite for a degenerate area
fn aspect(dx: f64, dy: f64) -> f64 {
    if dx <= 0.0 || dy <= 0.0 {
        return f64::INFINITY;
    }
    (dy / dx).max(dx / dy)
}

fn collapse(mut rect: Rect) -> Rect {
    if rect.x1 < rect.x0 {
        let mid = (rect.x0 + rect.x1) / 2.0;
        rect.x0 = mid;
        rect.x1 = mid;
    }
    if rect.y1 < rect.y0 {
        let mid = (rect.y0 + rect.y1) / 2.0;
        rect.y0 = mid;
        rect.y1 = mid;
    }
    rect
}

/// Lay `row` out left to right across `area`.
fn dice<T>(hierarchy: &mut Hierarchy<T>, row: &[usize], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 { area.width() / row_value } else { 0.0 };
    let mut x = area.x0;
    for &index in row {
        let node = hierarchy.node_mut(index);
        let x1 = x + node.value * k;
        node.rect = Rect::new(x, area.y0, x1, area.y1);
        x = x1;
    }
}

/// Lay `row` out top to bottom across `area`.
fn slice<T>(hierarchy: &mut Hierarchy<T>, row: &[usize], row_value: f64, area: Rect) {
    let k = if row_value != 0.0 { area.height() / row_value } else { 0.0 };
    let mut y = area.y0;
    for &index in row {
        let node = hierarchy.node_mut(index);
        let y1 = y + node.value * k;
        node.rect = Rect::new(area.x0, y, area.x1, y1);
        y = y1;
    }
}
