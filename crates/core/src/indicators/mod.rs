//! Technical indicator engine - EMA, MACD, RSI, momentum and trend
//! classification over a price time series.

mod engine;
mod indicators_model;

pub use engine::{
    ema_series, macd_series, momentum_series, resolve_trend_state, rsi_series, trend_states,
    MacdSeries,
};
pub use indicators_model::{IndicatorConfig, TechnicalSnapshot, TrendState};
