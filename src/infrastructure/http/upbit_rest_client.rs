use futures::future::LocalBoxFuture;

use super::GlooHttpClient;
use crate::domain::{
    errors::AppError,
    logging::LogComponent,
    market_data::{
        Candle, CandlePeriod, CandleRepository, CoinTicker, MAX_FETCH_CANDLE_COUNT, Market,
        MarketCapInfo, MarketOverviewRepository,
    },
};

pub const DEFAULT_API_BASE: &str = "https://api.upbit.com";

/// REST client for the exchange's public quotation API
#[derive(Debug, Clone)]
pub struct UpbitRestClient {
    http: GlooHttpClient,
    market_cap_url: Option<String>,
}

impl Default for UpbitRestClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None)
    }
}

impl UpbitRestClient {
    pub fn new(api_base: &str, market_cap_url: Option<String>) -> Self {
        Self { http: GlooHttpClient::new(api_base), market_cap_url }
    }

    /// Candles endpoint; `cursor` limits the answer to candles older than it.
    pub fn candles_url(
        &self,
        period: CandlePeriod,
        market: &Market,
        count: usize,
        cursor: Option<&Candle>,
    ) -> String {
        let count = count.clamp(1, MAX_FETCH_CANDLE_COUNT);
        let mut url = self.http.url_for(&format!(
            "/v1/candles/{}?market={}&count={}",
            period.api_path(),
            market.value(),
            count
        ));
        if let Some(cursor) = cursor {
            url.push_str(&format!("&to={}Z", cursor.candle_date_time_utc));
        }
        url
    }

    pub fn tickers_url(&self, markets: &[Market]) -> String {
        let joined: Vec<&str> = markets.iter().map(|m| m.value()).collect();
        self.http.url_for(&format!("/v1/ticker?markets={}", joined.join(",")))
    }

    pub async fn get_candles(
        &self,
        period: CandlePeriod,
        market: &Market,
        count: usize,
        cursor: Option<&Candle>,
    ) -> Result<Vec<Candle>, AppError> {
        let url = self.candles_url(period, market, count, cursor);
        crate::log_info!(LogComponent::Infrastructure("UpbitRest"), "📈 Fetching candles from: {url}");

        let candles: Vec<Candle> = self.http.get_json(&url).await?;

        crate::log_info!(LogComponent::Infrastructure("UpbitRest"), "✅ Loaded {} candles for {market}", candles.len());
        Ok(candles)
    }

    pub async fn get_tickers(&self, markets: &[Market]) -> Result<Vec<CoinTicker>, AppError> {
        if markets.is_empty() {
            return Ok(Vec::new());
        }
        self.http.get_json(&self.tickers_url(markets)).await
    }

    /// Market caps from the configured endpoint; none configured means none known.
    pub async fn get_market_caps(&self) -> Result<Vec<MarketCapInfo>, AppError> {
        match &self.market_cap_url {
            Some(url) => self.http.get_json(url).await,
            None => Ok(Vec::new()),
        }
    }
}

impl CandleRepository for UpbitRestClient {
    fn fetch_candles<'a>(
        &'a self,
        period: CandlePeriod,
        market: &'a Market,
        count: usize,
        cursor: Option<&'a Candle>,
    ) -> LocalBoxFuture<'a, Result<Vec<Candle>, AppError>> {
        Box::pin(self.get_candles(period, market, count, cursor))
    }
}

impl MarketOverviewRepository for UpbitRestClient {
    fn fetch_tickers<'a>(
        &'a self,
        markets: &'a [Market],
    ) -> LocalBoxFuture<'a, Result<Vec<CoinTicker>, AppError>> {
        Box::pin(self.get_tickers(markets))
    }

    fn fetch_market_caps(&self) -> LocalBoxFuture<'_, Result<Vec<MarketCapInfo>, AppError>> {
        Box::pin(self.get_market_caps())
    }
}
