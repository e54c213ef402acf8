use crate::errors::{Error, Result};

use super::{IndicatorConfig, TechnicalSnapshot, TrendState};

/// MACD line, signal and histogram series, index-aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub line: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Exponential moving average over the series.
///
/// The recurrence is seeded with the first sample and advances on every
/// one, but the output stays undefined until `period - 1` samples have
/// been consumed.
pub fn ema_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if period == 0 {
        return Err(Error::InvalidPeriod(period));
    }

    let mut out = Vec::with_capacity(values.len());
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = 0.0;

    for (i, &value) in values.iter().enumerate() {
        if i == 0 {
            ema = value;
        } else {
            ema = (value - ema) * multiplier + ema;
        }
        out.push(if i + 1 >= period { Some(ema) } else { None });
    }

    Ok(out)
}

/// MACD: short EMA minus long EMA, with a signal EMA over the MACD line.
///
/// During the long EMA's warm-up the signal EMA is fed zeros so its
/// internal state still advances; the exposed signal and histogram are
/// suppressed until index `long + signal - 2`.
pub fn macd_series(
    values: &[f64],
    short_period: usize,
    long_period: usize,
    signal_period: usize,
) -> Result<MacdSeries> {
    if signal_period == 0 {
        return Err(Error::InvalidPeriod(signal_period));
    }
    let short = ema_series(values, short_period)?;
    let long = ema_series(values, long_period)?;

    let line: Vec<Option<f64>> = short
        .iter()
        .zip(long.iter())
        .map(|(s, l)| match (s, l) {
            (Some(s), Some(l)) => Some(s - l),
            _ => None,
        })
        .collect();

    let signal_multiplier = 2.0 / (signal_period as f64 + 1.0);
    let defined_from = (long_period + signal_period).saturating_sub(2);
    let mut signal_ema = 0.0;
    let mut signal = Vec::with_capacity(values.len());
    let mut histogram = Vec::with_capacity(values.len());

    for (i, macd) in line.iter().enumerate() {
        let fed = macd.unwrap_or(0.0);
        if i == 0 {
            signal_ema = fed;
        } else {
            signal_ema = (fed - signal_ema) * signal_multiplier + signal_ema;
        }

        if i >= defined_from {
            signal.push(Some(signal_ema));
            histogram.push(macd.map(|m| m - signal_ema));
        } else {
            signal.push(None);
            histogram.push(None);
        }
    }

    Ok(MacdSeries {
        line,
        signal,
        histogram,
    })
}

/// Relative strength index with Wilder smoothing.
///
/// The average gain/loss pair is seeded with a simple mean over the first
/// `period` deltas, then follows `avg = (avg * (period - 1) + new) / period`.
/// A zero average loss clamps RSI to 100.
pub fn rsi_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if period == 0 {
        return Err(Error::InvalidPeriod(period));
    }

    let mut out = vec![None; values.len()];
    if values.len() <= period {
        return Ok(out);
    }

    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..=period {
        let delta = values[i] - values[i - 1];
        if delta > 0.0 {
            avg_gain += delta;
        } else {
            avg_loss += -delta;
        }
    }
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in (period + 1)..values.len() {
        let delta = values[i] - values[i - 1];
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta < 0.0 { -delta } else { 0.0 };
        avg_gain = (avg_gain * (period as f64 - 1.0) + gain) / period as f64;
        avg_loss = (avg_loss * (period as f64 - 1.0) + loss) / period as f64;
        out[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    Ok(out)
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        // Infinite relative strength, clamped.
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Rate of change against the value `period` samples back, in percent.
///
/// Undefined below index `period` and wherever the lag value is zero.
pub fn momentum_series(values: &[f64], period: usize) -> Result<Vec<Option<f64>>> {
    if period == 0 {
        return Err(Error::InvalidPeriod(period));
    }

    let out = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if i < period {
                return None;
            }
            let lag = values[i - period];
            if lag == 0.0 {
                None
            } else {
                Some((value / lag - 1.0) * 100.0)
            }
        })
        .collect();

    Ok(out)
}

/// Resolves the trend state from the four indicator inputs.
///
/// Any undefined input yields `Unknown`; once all four are defined the
/// result is one of the three genuine classifications.
pub fn resolve_trend_state(
    macd: Option<f64>,
    macd_signal: Option<f64>,
    rsi: Option<f64>,
    momentum: Option<f64>,
    config: &IndicatorConfig,
) -> TrendState {
    let (macd, signal, rsi, momentum) = match (macd, macd_signal, rsi, momentum) {
        (Some(m), Some(s), Some(r), Some(mo)) => (m, s, r, mo),
        _ => return TrendState::Unknown,
    };

    if macd > signal && rsi >= config.rsi_bullish && momentum > 0.0 {
        TrendState::Bullish
    } else if macd < signal && rsi < config.rsi_bearish && momentum < 0.0 {
        TrendState::Bearish
    } else {
        TrendState::Neutral
    }
}

/// Trend state at every index of the series.
pub fn trend_states(values: &[f64], config: &IndicatorConfig) -> Result<Vec<TrendState>> {
    let macd = macd_series(values, config.ema_short, config.ema_long, config.macd_signal)?;
    let rsi = rsi_series(values, config.rsi_period)?;
    let momentum = momentum_series(values, config.momentum_period)?;

    Ok((0..values.len())
        .map(|i| resolve_trend_state(macd.line[i], macd.signal[i], rsi[i], momentum[i], config))
        .collect())
}

impl TechnicalSnapshot {
    /// Computes the indicator bundle at the end of the series.
    pub fn compute(values: &[f64], config: &IndicatorConfig) -> Result<TechnicalSnapshot> {
        if values.is_empty() {
            return Ok(TechnicalSnapshot::default());
        }
        let last = values.len() - 1;

        let ema_short = ema_series(values, config.ema_short)?;
        let ema_long = ema_series(values, config.ema_long)?;
        let macd = macd_series(values, config.ema_short, config.ema_long, config.macd_signal)?;
        let rsi = rsi_series(values, config.rsi_period)?;
        let momentum = momentum_series(values, config.momentum_period)?;

        let state =
            resolve_trend_state(macd.line[last], macd.signal[last], rsi[last], momentum[last], config);
        let trend_changed = if last > 0 {
            let previous = resolve_trend_state(
                macd.line[last - 1],
                macd.signal[last - 1],
                rsi[last - 1],
                momentum[last - 1],
                config,
            );
            previous != TrendState::Unknown && state != TrendState::Unknown && previous != state
        } else {
            false
        };

        Ok(TechnicalSnapshot {
            ema_short: ema_short[last],
            ema_long: ema_long[last],
            macd: macd.line[last],
            macd_signal: macd.signal[last],
            macd_histogram: macd.histogram[last],
            rsi: rsi[last],
            momentum: momentum[last],
            trend_state: state,
            trend_changed,
        })
    }
}
