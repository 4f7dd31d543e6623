use crypto_graph_wasm::application::{MarketOverviewUseCase, build_coin_contents};
use crypto_graph_wasm::domain::errors::AppError;
use crypto_graph_wasm::domain::market_data::{
    CoinTicker, Market, MarketCapInfo, MarketOverviewRepository, Price,
};
use crypto_graph_wasm::domain::treemap::{CoinRateContent, ROOT_NAME};
use std::cell::Cell;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;

fn ticker(symbol: &str, rate: f64, traded: f64) -> CoinTicker {
    CoinTicker {
        market: Market::from_symbol(symbol),
        trade_price: Price::from(1_000.0),
        signed_change_rate: rate,
        acc_trade_price_24h: traded,
    }
}

fn cap(symbol: &str, market_cap: f64, rank: u32) -> MarketCapInfo {
    MarketCapInfo { symbol: symbol.to_string(), name: None, market_cap, cmc_rank: rank }
}

fn markets(symbols: &[&str]) -> Vec<Market> {
    symbols.iter().map(|s| Market::from_symbol(s)).collect()
}

fn find<'a>(contents: &'a [CoinRateContent], name: &str) -> &'a CoinRateContent {
    contents.iter().find(|c| c.name == name).expect("coin present")
}

#[test]
fn root_comes_first_and_unknown_markets_are_skipped() {
    let contents = build_coin_contents(
        &markets(&["BTC", "ETH", "XYZ"]),
        &[ticker("BTC", 0.0123, 5e11), ticker("ETH", -0.02, 2e11)],
        &[cap("btc", 1.2e15, 1)],
    );

    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0].name, ROOT_NAME);
    assert!(contents[0].is_root());
    assert!(contents.iter().all(|c| c.name != "KRW-XYZ"));
    assert!(contents[1..].iter().all(|c| c.parent == ROOT_NAME));
}

#[test]
fn figures_come_from_tickers_and_caps() {
    let contents = build_coin_contents(
        &markets(&["BTC", "ETH"]),
        &[ticker("ETH", -0.02, 2e11), ticker("BTC", 0.0123, 5e11)],
        &[cap("BTC", 1.2e15, 1)],
    );

    let btc = find(&contents, "KRW-BTC");
    assert!((btc.value - 1.23).abs() < 1e-9);
    assert_eq!(btc.acc_trade_price_24h, 5e11);
    assert_eq!(btc.market_cap, 1.2e15);
    assert_eq!(btc.cmc_rank, 1);
    assert_eq!(btc.symbol(), "BTC");

    // no cap data: rank by list position
    let eth = find(&contents, "KRW-ETH");
    assert_eq!(eth.market_cap, 0.0);
    assert_eq!(eth.cmc_rank, 2);
    assert!((eth.value + 2.0).abs() < 1e-9);
}

#[test]
fn duplicate_markets_appear_once() {
    let contents = build_coin_contents(&markets(&["BTC", "btc"]), &[ticker("BTC", 0.01, 1.0)], &[]);
    assert_eq!(contents.len(), 2);
}

/// Canned answers; counts the requests made for each endpoint
struct StubOverview {
    tickers: Result<Vec<CoinTicker>, AppError>,
    caps: Result<Vec<MarketCapInfo>, AppError>,
    ticker_calls: Rc<Cell<usize>>,
    cap_calls: Rc<Cell<usize>>,
}

fn stub(
    tickers: Result<Vec<CoinTicker>, AppError>,
    caps: Result<Vec<MarketCapInfo>, AppError>,
) -> StubOverview {
    StubOverview { tickers, caps, ticker_calls: Rc::default(), cap_calls: Rc::default() }
}

impl MarketOverviewRepository for StubOverview {
    fn fetch_tickers<'a>(
        &'a self,
        _markets: &'a [Market],
    ) -> LocalBoxFuture<'a, Result<Vec<CoinTicker>, AppError>> {
        self.ticker_calls.set(self.ticker_calls.get() + 1);
        let tickers = self.tickers.clone();
        Box::pin(async move { tickers })
    }

    fn fetch_market_caps(&self) -> LocalBoxFuture<'_, Result<Vec<MarketCapInfo>, AppError>> {
        self.cap_calls.set(self.cap_calls.get() + 1);
        let caps = self.caps.clone();
        Box::pin(async move { caps })
    }
}

#[test]
fn market_cap_failure_only_costs_ranking() {
    let use_case = MarketOverviewUseCase::new(stub(
        Ok(vec![ticker("BTC", 0.01, 1e9), ticker("ETH", 0.02, 1e9)]),
        Err(AppError::Network("HTTP error: 503".to_string())),
    ));

    let contents = block_on(use_case.execute(&markets(&["BTC", "ETH"]))).expect("overview");
    assert_eq!(contents.len(), 3);
    assert_eq!(find(&contents, "KRW-ETH").cmc_rank, 2);
}

#[test]
fn ticker_failure_is_reported() {
    let use_case = MarketOverviewUseCase::new(stub(
        Err(AppError::Network("HTTP error: 429".to_string())),
        Ok(Vec::new()),
    ));

    let result = block_on(use_case.execute(&markets(&["BTC"])));
    assert_eq!(result, Err(AppError::Network("HTTP error: 429".to_string())));
}

#[test]
fn refreshes_reuse_the_first_market_caps() {
    let overview = stub(
        Ok(vec![ticker("BTC", 0.01, 1e9), ticker("ETH", 0.02, 1e9)]),
        Ok(vec![cap("ETH", 4e14, 2), cap("BTC", 1.2e15, 1)]),
    );
    let (ticker_calls, cap_calls) = (Rc::clone(&overview.ticker_calls), Rc::clone(&overview.cap_calls));
    let use_case = MarketOverviewUseCase::new(overview);
    let list = markets(&["ETH", "BTC"]);

    for _ in 0..3 {
        let contents = block_on(use_case.execute(&list)).expect("overview");
        assert_eq!(find(&contents, "KRW-BTC").cmc_rank, 1);
        assert_eq!(find(&contents, "KRW-ETH").market_cap, 4e14);
    }
    assert_eq!(ticker_calls.get(), 3);
    assert_eq!(cap_calls.get(), 1);
}

#[test]
fn failed_market_caps_are_not_refetched() {
    let overview = stub(
        Ok(vec![ticker("BTC", 0.01, 1e9)]),
        Err(AppError::Network("HTTP error: 503".to_string())),
    );
    let cap_calls = Rc::clone(&overview.cap_calls);
    let use_case = MarketOverviewUseCase::new(overview);

    block_on(use_case.execute(&markets(&["BTC"]))).expect("overview");
    let contents = block_on(use_case.execute(&markets(&["BTC"]))).expect("overview");
    assert_eq!(find(&contents, "KRW-BTC").cmc_rank, 1);
    assert_eq!(cap_calls.get(), 1);
}
