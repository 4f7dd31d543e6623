use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::AppError;

/// Quote currency every market on the dashboard is listed against
pub const DEFAULT_QUOTE: &str = "KRW";

/// Value Object - Price in quote currency
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - Traded amount
#[derive(Debug, Clone, Copy, PartialEq, Default, From, Into, Constructor, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Value Object - Milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, From, Into, Constructor,
    Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Value Object - Exchange market code such as `KRW-BTC`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
#[serde(transparent)]
pub struct Market(String);

impl Market {
    /// Parse a full market code, `QUOTE-BASE`.
    pub fn new(code: &str) -> Result<Self, AppError> {
        let code = code.trim().to_uppercase();
        match code.split_once('-') {
            Some((quote, base)) if !quote.is_empty() && !base.is_empty() => Ok(Self(code)),
            _ => Err(AppError::Validation(format!("Invalid market code: {code:?}"))),
        }
    }

    /// Market for a bare coin symbol against the default quote.
    pub fn from_symbol(symbol: &str) -> Self {
        Self(format!("{}-{}", DEFAULT_QUOTE, symbol.trim().to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Coin symbol, the part after the dash
    pub fn symbol(&self) -> &str {
        self.0.split_once('-').map(|(_, base)| base).unwrap_or(&self.0)
    }
}

impl Default for Market {
    fn default() -> Self {
        Self::from_symbol("BTC")
    }
}

/// Value Object - Candle unit supported by the candles endpoint
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString,
    AsRefStr, Serialize, Deserialize,
)]
pub enum CandlePeriod {
    #[strum(serialize = "1m")]
    #[serde(rename = "1m")]
    OneMinute,
    #[strum(serialize = "3m")]
    #[serde(rename = "3m")]
    ThreeMinutes,
    #[strum(serialize = "5m")]
    #[serde(rename = "5m")]
    FiveMinutes,
    #[strum(serialize = "10m")]
    #[serde(rename = "10m")]
    TenMinutes,
    #[strum(serialize = "15m")]
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[strum(serialize = "30m")]
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[strum(serialize = "1h")]
    #[serde(rename = "1h")]
    OneHour,
    #[strum(serialize = "4h")]
    #[serde(rename = "4h")]
    FourHours,
    #[default]
    #[strum(serialize = "1d")]
    #[serde(rename = "1d")]
    OneDay,
    #[strum(serialize = "1w")]
    #[serde(rename = "1w")]
    OneWeek,
    #[strum(serialize = "1M")]
    #[serde(rename = "1M")]
    OneMonth,
}

impl CandlePeriod {
    /// Path segment under `/v1/candles/`
    pub fn api_path(&self) -> &'static str {
        match self {
            Self::OneMinute => "minutes/1",
            Self::ThreeMinutes => "minutes/3",
            Self::FiveMinutes => "minutes/5",
            Self::TenMinutes => "minutes/10",
            Self::FifteenMinutes => "minutes/15",
            Self::ThirtyMinutes => "minutes/30",
            Self::OneHour => "minutes/60",
            Self::FourHours => "minutes/240",
            Self::OneDay => "days",
            Self::OneWeek => "weeks",
            Self::OneMonth => "months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneMinute => "1 min",
            Self::ThreeMinutes => "3 min",
            Self::FiveMinutes => "5 min",
            Self::TenMinutes => "10 min",
            Self::FifteenMinutes => "15 min",
            Self::ThirtyMinutes => "30 min",
            Self::OneHour => "1 hour",
            Self::FourHours => "4 hours",
            Self::OneDay => "1 day",
            Self::OneWeek => "1 week",
            Self::OneMonth => "1 month",
        }
    }

    pub fn is_intraday(&self) -> bool {
        self.api_path().starts_with("minutes/")
    }
}
