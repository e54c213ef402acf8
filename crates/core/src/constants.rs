/// Base currency all valuations are normalized to.
pub const BASE_CURRENCY: &str = "EUR";

/// Synthetic portfolio id for the cross-portfolio aggregate.
pub const PORTFOLIO_ALL_ID: &str = "ALL";

/// Decimal precision for displayed percentages.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Short EMA period feeding the MACD line.
pub const EMA_SHORT_PERIOD: usize = 12;

/// Long EMA period feeding the MACD line.
pub const EMA_LONG_PERIOD: usize = 26;

/// EMA period of the MACD signal line.
pub const MACD_SIGNAL_PERIOD: usize = 9;

/// RSI lookback (Wilder smoothing).
pub const RSI_PERIOD: usize = 14;

/// Momentum lookback in samples.
pub const MOMENTUM_PERIOD: usize = 20;

/// RSI level required (together with MACD and momentum) for a BULLISH call.
pub const RSI_BULLISH_THRESHOLD: f64 = 60.0;

/// RSI level below which (together with MACD and momentum) a BEARISH call is made.
pub const RSI_BEARISH_THRESHOLD: f64 = 40.0;

/// Tolerance band applied to a governance target that does not supply one, in points.
pub const DEFAULT_TOLERANCE_BAND_PCT: &str = "5";

/// Share of total value above which the unclassified bucket is flagged, in percent.
pub const UNCLASSIFIED_BREACH_SHARE_PCT: &str = "10";

/// Allowed deviation of the target-percent sum from 100, in points.
pub const TARGET_SUM_TOLERANCE_PCT: &str = "0.1";
