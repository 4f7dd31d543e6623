//! Dashboard settings, overridable from the host page.

use serde::{Deserialize, Serialize};

use crate::domain::{
    chart::{DEFAULT_CANDLE_WIDTH, MAX_CANDLE_WIDTH, MIN_CANDLE_WIDTH},
    errors::{AppError, AppResult},
    logging::LogComponent,
    market_data::{CandlePeriod, Market},
    treemap::SortKind,
};
use crate::infrastructure::http::DEFAULT_API_BASE;

/// Id of the `<script type="application/json">` element holding overrides
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

pub const DEFAULT_MARKETS: [&str; 20] = [
    "BTC", "ETH", "XRP", "SOL", "DOGE", "ADA", "TRX", "AVAX", "LINK", "DOT", "BCH", "ETC", "XLM",
    "SHIB", "NEAR", "APT", "SUI", "HBAR", "ATOM", "SAND",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base: String,
    /// Endpoint returning `[MarketCapInfo]`; without it tiles rank by list order
    pub market_cap_url: Option<String>,
    /// Bare coin symbols shown in the treemap
    pub markets: Vec<String>,
    pub default_market: String,
    pub default_period: CandlePeriod,
    pub default_sort: SortKind,
    pub refresh_interval_ms: u32,
    pub min_candle_width: f64,
    pub default_candle_width: f64,
    pub max_candle_width: f64,
    pub mobile_breakpoint_px: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            market_cap_url: None,
            markets: DEFAULT_MARKETS.iter().map(|s| s.to_string()).collect(),
            default_market: "KRW-BTC".to_string(),
            default_period: CandlePeriod::default(),
            default_sort: SortKind::default(),
            refresh_interval_ms: 5_000,
            min_candle_width: MIN_CANDLE_WIDTH,
            default_candle_width: DEFAULT_CANDLE_WIDTH,
            max_candle_width: MAX_CANDLE_WIDTH,
            mobile_breakpoint_px: 600,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    /// Parsed overrides, or defaults with a warning when `json` is unusable.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
            return Self::default();
        };
        Self::from_json(json).unwrap_or_else(|e| {
            crate::log_warn!(LogComponent::Presentation("Config"), "⚠️ Ignoring dashboard config: {e}");
            Self::default()
        })
    }

    /// Overrides embedded in the page, if any.
    pub fn from_document() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_json_or_default(json.as_deref())
    }

    fn validate(self) -> AppResult<Self> {
        let (min, default, max) = (self.min_candle_width, self.default_candle_width, self.max_candle_width);
        if !(min > 0.0 && min <= default && default <= max) {
            return Err(AppError::Config(format!(
                "candle widths must satisfy 0 < min <= default <= max, got {min}/{default}/{max}"
            )));
        }
        if self.refresh_interval_ms == 0 {
            return Err(AppError::Config("refresh_interval_ms must be positive".to_string()));
        }
        Market::new(&self.default_market)?;
        Ok(self)
    }

    pub fn default_market(&self) -> Market {
        Market::new(&self.default_market).unwrap_or_default()
    }

    pub fn market_list(&self) -> Vec<Market> {
        self.markets.iter().map(|s| Market::from_symbol(s)).collect()
    }
}
