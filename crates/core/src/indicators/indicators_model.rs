use serde::{Deserialize, Serialize};

use crate::constants::{
    EMA_LONG_PERIOD, EMA_SHORT_PERIOD, MACD_SIGNAL_PERIOD, MOMENTUM_PERIOD,
    RSI_BEARISH_THRESHOLD, RSI_BULLISH_THRESHOLD, RSI_PERIOD,
};

/// Categorical momentum classification derived from MACD, RSI and momentum.
///
/// `Unknown` is reserved for insufficient history: it must stay
/// distinguishable from a genuine `Neutral` call made on defined inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendState {
    Bullish,
    Bearish,
    Neutral,
    #[default]
    Unknown,
}

impl TrendState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendState::Bullish => "BULLISH",
            TrendState::Bearish => "BEARISH",
            TrendState::Neutral => "NEUTRAL",
            TrendState::Unknown => "UNKNOWN",
        }
    }
}

impl From<&str> for TrendState {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BULLISH" => TrendState::Bullish,
            "BEARISH" => TrendState::Bearish,
            "NEUTRAL" => TrendState::Neutral,
            _ => TrendState::Unknown,
        }
    }
}

impl std::fmt::Display for TrendState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Periods and thresholds driving the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorConfig {
    pub ema_short: usize,
    pub ema_long: usize,
    pub macd_signal: usize,
    pub rsi_period: usize,
    pub momentum_period: usize,
    pub rsi_bullish: f64,
    pub rsi_bearish: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            ema_short: EMA_SHORT_PERIOD,
            ema_long: EMA_LONG_PERIOD,
            macd_signal: MACD_SIGNAL_PERIOD,
            rsi_period: RSI_PERIOD,
            momentum_period: MOMENTUM_PERIOD,
            rsi_bullish: RSI_BULLISH_THRESHOLD,
            rsi_bearish: RSI_BEARISH_THRESHOLD,
        }
    }
}

/// Indicator values at the end of one time series.
///
/// `None` fields mean the series is still inside the indicator's warm-up
/// window, not that the computation failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSnapshot {
    pub ema_short: Option<f64>,
    pub ema_long: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub rsi: Option<f64>,
    pub momentum: Option<f64>,
    pub trend_state: TrendState,
    /// True when the trend state differs from the immediately preceding
    /// period and both states are defined.
    pub trend_changed: bool,
}
