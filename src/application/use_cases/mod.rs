pub mod candle_history;
pub mod market_overview;

pub use candle_history::*;
pub use market_overview::*;
