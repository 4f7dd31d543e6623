pub mod candle_chart;
pub mod chart_tag;
pub mod tree_chart;
pub mod wasm_api;

pub use candle_chart::CandleChart;
pub use chart_tag::ChartTag;
pub use tree_chart::TreeChart;
