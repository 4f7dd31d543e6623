use crypto_graph_wasm::domain::market_data::{Candle, CandlePeriod, CoinTicker, Market, MarketCapInfo};
use crypto_graph_wasm::infrastructure::http::{GlooHttpClient, UpbitRestClient};

const CANDLES: &str = r#"[
    {
        "market": "KRW-BTC",
        "candle_date_time_utc": "2024-03-05T00:00:00",
        "candle_date_time_kst": "2024-03-05T09:00:00",
        "opening_price": 94000000.0,
        "high_price": 95000000.0,
        "low_price": 93000000.0,
        "trade_price": 94500000.0,
        "timestamp": 1709629199999,
        "candle_acc_trade_price": 123456789.5,
        "candle_acc_trade_volume": 1.2345,
        "prev_closing_price": 94000000.0,
        "change_price": 500000.0,
        "change_rate": 0.0053
    }
]"#;

const TICKERS: &str = r#"[
    {
        "market": "KRW-ETH",
        "trade_date": "20240305",
        "trade_price": 5100000.0,
        "change": "FALL",
        "signed_change_rate": -0.0123,
        "acc_trade_price_24h": 412345678901.2,
        "timestamp": 1709629199999
    }
]"#;

#[test]
fn candles_parse_ignoring_extra_fields() {
    let candles: Vec<Candle> = serde_json::from_str(CANDLES).expect("candles");
    let candle = &candles[0];
    assert_eq!(candle.market, Market::default());
    assert_eq!(candle.candle_date_time_kst, "2024-03-05T09:00:00");
    assert_eq!(candle.trade_price.value(), 94_500_000.0);
    assert_eq!(candle.timestamp.value(), 1_709_629_199_999);
    assert_eq!(candle.candle_acc_trade_volume.value(), 1.2345);
    assert!(candle.is_bullish());
}

#[test]
fn tickers_parse() {
    let tickers: Vec<CoinTicker> = serde_json::from_str(TICKERS).expect("tickers");
    assert_eq!(tickers[0].market.symbol(), "ETH");
    assert_eq!(tickers[0].signed_change_rate, -0.0123);
}

#[test]
fn market_caps_parse_with_optional_name() {
    let caps: Vec<MarketCapInfo> =
        serde_json::from_str(r#"[{"symbol":"BTC","market_cap":1.2e15,"cmc_rank":1}]"#).expect("caps");
    assert_eq!(caps[0].name, None);
    assert_eq!(caps[0].cmc_rank, 1);
}

#[test]
fn candles_url_pages_back_from_cursor() {
    let client = UpbitRestClient::new("https://api.upbit.com/", None);
    let btc = Market::default();
    assert_eq!(
        client.candles_url(CandlePeriod::OneDay, &btc, 200, None),
        "https://api.upbit.com/v1/candles/days?market=KRW-BTC&count=200"
    );

    let candles: Vec<Candle> = serde_json::from_str(CANDLES).expect("candles");
    assert_eq!(
        client.candles_url(CandlePeriod::FifteenMinutes, &btc, 500, candles.first()),
        "https://api.upbit.com/v1/candles/minutes/15?market=KRW-BTC&count=200&to=2024-03-05T00:00:00Z"
    );
    assert_eq!(
        client.candles_url(CandlePeriod::OneMonth, &btc, 0, None),
        "https://api.upbit.com/v1/candles/months?market=KRW-BTC&count=1"
    );
}

#[test]
fn tickers_url_joins_markets() {
    let client = UpbitRestClient::default();
    let markets = vec![Market::from_symbol("BTC"), Market::from_symbol("ETH")];
    assert_eq!(client.tickers_url(&markets), "https://api.upbit.com/v1/ticker?markets=KRW-BTC,KRW-ETH");
}

#[test]
fn http_client_joins_relative_paths_only() {
    let http = GlooHttpClient::new("https://proxy.example/api/");
    assert_eq!(http.url_for("/v1/ticker"), "https://proxy.example/api/v1/ticker");
    assert_eq!(http.url_for("v1/ticker"), "https://proxy.example/api/v1/ticker");
    assert_eq!(http.url_for("https://caps.example/top"), "https://caps.example/top");
}

#[test]
fn market_codes_are_validated() {
    assert_eq!(Market::new(" krw-sol ").map(|m| m.to_string()), Ok("KRW-SOL".to_string()));
    assert!(Market::new("BTC").is_err());
    assert!(Market::new("-BTC").is_err());
    assert_eq!(Market::from_symbol("doge").symbol(), "DOGE");
}
