use futures::future::LocalBoxFuture;

use crate::domain::errors::AppError;
use crate::domain::market_data::{Candle, CandlePeriod, CoinTicker, Market, MarketCapInfo};

/// Upper bound the candles endpoint accepts for `count`
pub const MAX_FETCH_CANDLE_COUNT: usize = 200;

/// Source of candle history.
///
/// Futures are `!Send`: everything runs on the browser event loop.
pub trait CandleRepository {
    /// Up to `count` candles, newest first, strictly older than `cursor` when given.
    fn fetch_candles<'a>(
        &'a self,
        period: CandlePeriod,
        market: &'a Market,
        count: usize,
        cursor: Option<&'a Candle>,
    ) -> LocalBoxFuture<'a, Result<Vec<Candle>, AppError>>;
}

/// Source of the per-coin figures shown in the treemap
pub trait MarketOverviewRepository {
    fn fetch_tickers<'a>(
        &'a self,
        markets: &'a [Market],
    ) -> LocalBoxFuture<'a, Result<Vec<CoinTicker>, AppError>>;

    fn fetch_market_caps(&self) -> LocalBoxFuture<'_, Result<Vec<MarketCapInfo>, AppError>>;
}
