pub use super::value_objects::{Market, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Domain entity - one OHLC record for a fixed period.
///
/// Field names follow the candles endpoint so records deserialize as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub market: Market,
    pub candle_date_time_utc: String,
    pub candle_date_time_kst: String,
    pub opening_price: Price,
    pub high_price: Price,
    pub low_price: Price,
    /// Close price
    pub trade_price: Price,
    /// Time of the last trade inside the candle
    pub timestamp: Timestamp,
    pub candle_acc_trade_price: Volume,
    pub candle_acc_trade_volume: Volume,
}

impl Candle {
    pub fn is_bullish(&self) -> bool {
        self.trade_price > self.opening_price
    }

    pub fn is_bearish(&self) -> bool {
        self.trade_price < self.opening_price
    }

    pub fn body_size(&self) -> Price {
        Price::from((self.trade_price.value() - self.opening_price.value()).abs())
    }

    /// Close-to-open change in percent
    pub fn change_rate(&self) -> f64 {
        let open = self.opening_price.value();
        if open == 0.0 {
            return 0.0;
        }
        (self.trade_price.value() - open) / open * 100.0
    }

    pub fn is_valid(&self) -> bool {
        let (o, h, l, c) = (
            self.opening_price.value(),
            self.high_price.value(),
            self.low_price.value(),
            self.trade_price.value(),
        );
        h >= o && h >= c && h >= l && l <= o && l <= c && self.candle_acc_trade_volume.value() >= 0.0
    }
}

/// Domain entity - the loaded candle array, newest first.
///
/// Index 0 is the most recent candle; older history is appended at the end
/// as the user scrolls back in time.
#[derive(Debug, Clone, Default)]
pub struct CandleHistory {
    candles: Vec<Candle>,
    exhausted: bool,
}

impl CandleHistory {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles, exhausted: false }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> Option<&Candle> {
        self.candles.first()
    }

    pub fn oldest(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// No older candles are available upstream.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Append a batch of older candles fetched with the oldest record as cursor.
    ///
    /// Returns `None` and leaves the history untouched when the batch's newest
    /// record is newer than the current oldest one (the upstream ignored the
    /// cursor). Records not strictly older than the current oldest are skipped.
    /// An accepted batch that adds nothing marks the history as exhausted.
    pub fn merge_older(&mut self, batch: Vec<Candle>) -> Option<usize> {
        let Some(oldest) = self.candles.last() else {
            let added = batch.len();
            self.exhausted = added == 0;
            self.candles = batch;
            return Some(added);
        };
        let Some(first) = batch.first() else {
            self.exhausted = true;
            return Some(0);
        };
        if first.candle_date_time_kst > oldest.candle_date_time_kst {
            return None;
        }

        let cutoff = oldest.candle_date_time_kst.clone();
        let before = self.candles.len();
        self.candles.extend(batch.into_iter().filter(|c| c.candle_date_time_kst < cutoff));
        let added = self.candles.len() - before;
        if added == 0 {
            self.exhausted = true;
        }
        Some(added)
    }

    /// `false` when every record of a non-empty batch is newer than the latest candle
    pub fn overlaps_latest(&self, batch: &[Candle]) -> bool {
        match self.candles.first() {
            Some(latest) if !batch.is_empty() => {
                batch.iter().any(|c| c.candle_date_time_kst <= latest.candle_date_time_kst)
            }
            _ => true,
        }
    }

    /// Merge a refresh of the newest candles.
    ///
    /// A record with the same KST date as the current latest replaces it,
    /// newer records are prepended. Returns how many candles were prepended,
    /// or `None` when every record of a non-empty batch is newer than the
    /// current latest: the candles in between are unknown, so nothing is merged.
    pub fn merge_latest(&mut self, batch: Vec<Candle>) -> Option<usize> {
        if !self.overlaps_latest(&batch) {
            return None;
        }
        let Some(latest_kst) = self.candles.first().map(|c| c.candle_date_time_kst.clone()) else {
            let added = batch.len();
            self.candles = batch;
            return Some(added);
        };

        let mut newer: Vec<Candle> = Vec::new();
        for candle in batch {
            if candle.candle_date_time_kst == latest_kst {
                self.candles[0] = candle;
            } else if candle.candle_date_time_kst > latest_kst {
                newer.push(candle);
            }
        }
        // keep newest-first order regardless of the batch order
        newer.sort_by(|a, b| b.candle_date_time_kst.cmp(&a.candle_date_time_kst));
        newer.dedup_by(|a, b| a.candle_date_time_kst == b.candle_date_time_kst);

        let added = newer.len();
        if added > 0 {
            newer.append(&mut self.candles);
            self.candles = newer;
        }
        Some(added)
    }

    /// Lowest low and highest high over `range`
    pub fn price_range(&self, range: std::ops::Range<usize>) -> Option<(Price, Price)> {
        let end = range.end.min(self.candles.len());
        let slice = self.candles.get(range.start.min(end)..end)?;
        let mut iter = slice.iter();
        let first = iter.next()?;
        let (mut low, mut high) = (first.low_price, first.high_price);
        for candle in iter {
            if candle.low_price < low {
                low = candle.low_price;
            }
            if candle.high_price > high {
                high = candle.high_price;
            }
        }
        Some((low, high))
    }

    /// Largest accumulated trade volume over `range`
    pub fn max_volume(&self, range: std::ops::Range<usize>) -> Volume {
        let end = range.end.min(self.candles.len());
        self.candles
            .get(range.start.min(end)..end)
            .unwrap_or_default()
            .iter()
            .map(|c| c.candle_acc_trade_volume.value())
            .fold(0.0_f64, f64::max)
            .into()
    }
}

/// 24h ticker for one market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinTicker {
    pub market: Market,
    pub trade_price: Price,
    /// Signed change rate as a fraction, e.g. `0.0123` for +1.23%
    pub signed_change_rate: f64,
    pub acc_trade_price_24h: f64,
}

/// Market capitalization and rank for one coin symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCapInfo {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    pub market_cap: f64,
    pub cmc_rank: u32,
}
