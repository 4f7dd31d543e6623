use std::cell::RefCell;
use std::collections::HashMap;

use crate::domain::{
    errors::AppResult,
    logging::LogComponent,
    market_data::{CoinTicker, Market, MarketCapInfo, MarketOverviewRepository},
    treemap::{CoinRateContent, ROOT_NAME},
};

/// Treemap input for `markets`: the root followed by one record per known market.
///
/// Markets without a ticker are skipped. Without market cap data the rank
/// falls back to the position in `markets`.
pub fn build_coin_contents(
    markets: &[Market],
    tickers: &[CoinTicker],
    market_caps: &[MarketCapInfo],
) -> Vec<CoinRateContent> {
    let rates: HashMap<&str, &CoinTicker> = tickers.iter().map(|t| (t.market.value(), t)).collect();
    let caps: HashMap<String, &MarketCapInfo> =
        market_caps.iter().map(|c| (c.symbol.to_uppercase(), c)).collect();

    let mut contents = vec![CoinRateContent::root()];
    for (position, market) in markets.iter().enumerate() {
        let Some(ticker) = rates.get(market.value()) else {
            crate::log_debug!(LogComponent::Application("MarketOverview"), "No ticker for {market}, skipping");
            continue;
        };
        // duplicate symbols in the list would break stratify
        if contents.iter().any(|c| c.name == market.value()) {
            continue;
        }
        let cap = caps.get(market.symbol());
        contents.push(CoinRateContent {
            name: market.value().to_string(),
            ticker: market.value().to_string(),
            parent: ROOT_NAME.to_string(),
            value: ticker.signed_change_rate * 100.0,
            acc_trade_price_24h: ticker.acc_trade_price_24h,
            market_cap: cap.map(|c| c.market_cap).unwrap_or(0.0),
            cmc_rank: cap.map(|c| c.cmc_rank).unwrap_or(position as u32 + 1),
        });
    }
    contents
}

/// Loads tickers and market caps for the treemap.
///
/// Market caps are fetched by the first [`execute`](Self::execute) only;
/// later calls refresh the tickers and reuse them.
pub struct MarketOverviewUseCase<R: MarketOverviewRepository> {
    repository: R,
    market_caps: RefCell<Option<Vec<MarketCapInfo>>>,
}

impl<R: MarketOverviewRepository> MarketOverviewUseCase<R> {
    pub fn new(repository: R) -> Self {
        Self { repository, market_caps: RefCell::new(None) }
    }

    pub async fn execute(&self, markets: &[Market]) -> AppResult<Vec<CoinRateContent>> {
        if self.market_caps.borrow().is_none() {
            let caps = self.load_market_caps().await;
            *self.market_caps.borrow_mut() = Some(caps);
        }
        let tickers = self.repository.fetch_tickers(markets).await?;

        let contents =
            build_coin_contents(markets, &tickers, self.market_caps.borrow().as_deref().unwrap_or_default());
        crate::log_info!(
            LogComponent::Application("MarketOverview"),
            "✅ {} coins ready for the treemap",
            contents.len().saturating_sub(1)
        );
        Ok(contents)
    }

    /// Market caps are optional; their failure only costs the ranking and is not retried.
    async fn load_market_caps(&self) -> Vec<MarketCapInfo> {
        match self.repository.fetch_market_caps().await {
            Ok(caps) => caps,
            Err(e) => {
                crate::log_warn!(LogComponent::Application("MarketOverview"), "⚠️ Market caps unavailable: {e}");
                Vec::new()
            }
        }
    }
}
