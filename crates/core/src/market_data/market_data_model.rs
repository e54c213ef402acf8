use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::BASE_CURRENCY;
use crate::indicators::TrendState;
use crate::ingest::{
    coerce_bool, coerce_coverage, coerce_decimal, coerce_f64, coerce_string, coerce_timestamp,
    probe, FieldSet, RawRow,
};

/// Data quality of a market row as assessed by the sync job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataQualityStatus {
    #[default]
    Ok,
    Stale,
    LowConfidence,
    Partial,
}

impl From<&str> for DataQualityStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "STALE" => DataQualityStatus::Stale,
            "LOW_CONFIDENCE" => DataQualityStatus::LowConfidence,
            "PARTIAL" => DataQualityStatus::Partial,
            _ => DataQualityStatus::Ok,
        }
    }
}

/// Performance horizon selectable by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PerformanceHorizon {
    Day,
    Week,
    Month,
    Ytd,
}

/// Fractional returns per horizon, in base currency terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSet {
    pub day: Option<Decimal>,
    pub week: Option<Decimal>,
    pub month: Option<Decimal>,
    pub ytd: Option<Decimal>,
}

impl PerformanceSet {
    pub fn horizon(&self, horizon: PerformanceHorizon) -> Option<Decimal> {
        match horizon {
            PerformanceHorizon::Day => self.day,
            PerformanceHorizon::Week => self.week,
            PerformanceHorizon::Month => self.month,
            PerformanceHorizon::Ytd => self.ytd,
        }
    }
}

/// Pre-computed technical indicator columns carried on a market row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorBundle {
    pub ma_status: Option<String>,
    pub trend_slope: Option<Decimal>,
    pub volatility: Option<Decimal>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub momentum: Option<f64>,
    pub trend_state: Option<TrendState>,
    pub trend_changed: Option<bool>,
}

impl IndicatorBundle {
    fn is_empty(&self) -> bool {
        self == &IndicatorBundle::default()
    }
}

/// One row per tradable instrument. The ticker is the join key to
/// position rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketRecord {
    pub ticker: String,
    pub name: String,
    pub last_price: Option<Decimal>,
    pub currency: String,
    pub instrument_type: Option<String>,
    pub geo_coverage: Option<HashMap<String, Decimal>>,
    pub quality: DataQualityStatus,
    pub last_update: Option<DateTime<Utc>>,
    pub performance: PerformanceSet,
    pub indicators: Option<IndicatorBundle>,
}

/// Column layouts seen across revisions of the market table. The oldest
/// rows come straight from the sheet sync and only carry per-horizon
/// EUR performance columns.
const MARKET_SCHEMAS: &[FieldSet] = &[
    FieldSet {
        name: "market_v2",
        fields: &[
            ("ticker", "ticker"),
            ("name", "name"),
            ("last_price", "last_price"),
            ("currency", "currency"),
            ("instrument_type", "instrument_type"),
            ("geo_coverage", "geo_coverage"),
            ("status", "status"),
            ("last_update", "last_update"),
            ("perf_day", "perf_day"),
            ("perf_week", "perf_week"),
            ("perf_month", "perf_month"),
            ("perf_ytd", "perf_ytd"),
            ("ma_status", "ma_status"),
            ("trend_slope", "trend_slope"),
            ("volatility", "volatility"),
            ("rsi", "rsi"),
            ("macd", "macd"),
            ("macd_signal", "macd_signal"),
            ("macd_histogram", "macd_histogram"),
            ("momentum", "momentum"),
            ("trend_state", "trend_state"),
            ("trend_changed", "trend_changed"),
        ],
        required: &["ticker", "status"],
    },
    FieldSet {
        name: "market_watch_legacy",
        fields: &[
            ("ticker", "ticker"),
            ("name", "name"),
            ("last_price", "last_price"),
            ("currency", "currency"),
            ("instrument_type", "type"),
            ("geo_coverage", "geo_coverage"),
            ("last_update", "last_update"),
            ("perf_day", "perf_day_eur"),
            ("perf_week", "perf_week_local"),
            ("perf_month", "perf_month_local"),
            ("perf_ytd", "perf_ytd_eur"),
        ],
        required: &["ticker", "perf_day_eur"],
    },
    FieldSet {
        name: "market_minimal",
        fields: &[
            ("ticker", "ticker"),
            ("name", "name"),
            ("last_price", "last_price"),
            ("currency", "currency"),
        ],
        required: &["ticker"],
    },
];

impl MarketRecord {
    /// Best-effort parse of one market row. Returns `None` only when no
    /// layout resolves a ticker; every other field degrades to its
    /// absent form.
    pub fn from_row(row: &RawRow) -> Option<MarketRecord> {
        let schema = probe(row, MARKET_SCHEMAS)?;
        let ticker = coerce_string(schema.get(row, "ticker"))?.to_uppercase();

        let indicators = IndicatorBundle {
            ma_status: coerce_string(schema.get(row, "ma_status")),
            trend_slope: coerce_decimal(schema.get(row, "trend_slope")),
            volatility: coerce_decimal(schema.get(row, "volatility")),
            rsi: coerce_f64(schema.get(row, "rsi")),
            macd: coerce_f64(schema.get(row, "macd")),
            macd_signal: coerce_f64(schema.get(row, "macd_signal")),
            macd_histogram: coerce_f64(schema.get(row, "macd_histogram")),
            momentum: coerce_f64(schema.get(row, "momentum")),
            trend_state: coerce_string(schema.get(row, "trend_state"))
                .map(|s| TrendState::from(s.as_str())),
            trend_changed: coerce_bool(schema.get(row, "trend_changed")),
        };

        Some(MarketRecord {
            name: coerce_string(schema.get(row, "name")).unwrap_or_else(|| ticker.clone()),
            last_price: coerce_decimal(schema.get(row, "last_price")),
            currency: coerce_string(schema.get(row, "currency"))
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| BASE_CURRENCY.to_string()),
            instrument_type: coerce_string(schema.get(row, "instrument_type"))
                .map(|t| t.to_uppercase()),
            geo_coverage: coerce_coverage(schema.get(row, "geo_coverage")),
            quality: coerce_string(schema.get(row, "status"))
                .map(|s| DataQualityStatus::from(s.as_str()))
                .unwrap_or_default(),
            last_update: coerce_timestamp(schema.get(row, "last_update")),
            performance: PerformanceSet {
                day: coerce_decimal(schema.get(row, "perf_day")),
                week: coerce_decimal(schema.get(row, "perf_week")),
                month: coerce_decimal(schema.get(row, "perf_month")),
                ytd: coerce_decimal(schema.get(row, "perf_ytd")),
            },
            indicators: Some(indicators).filter(|b| !b.is_empty()),
            ticker,
        })
    }

    /// Parses a batch of rows into a ticker-keyed map, dropping rows
    /// without a resolvable ticker.
    pub fn map_from_rows(rows: &[RawRow]) -> HashMap<String, MarketRecord> {
        rows.iter()
            .filter_map(MarketRecord::from_row)
            .map(|record| (record.ticker.clone(), record))
            .collect()
    }

    /// A price of zero or below marks the instrument as unpriced.
    pub fn is_priced(&self) -> bool {
        self.last_price.is_some_and(|p| p > Decimal::ZERO)
    }

    /// Price usable for valuation: the last price when priced, zero
    /// otherwise so an unpriced instrument values to zero instead of
    /// disappearing.
    pub fn effective_price(&self) -> Decimal {
        if self.is_priced() {
            self.last_price.unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn row(pairs: &[(&str, serde_json::Value)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_legacy_sheet_row_parses() {
        let raw = row(&[
            ("ticker", json!("mc.pa")),
            ("name", json!("LVMH")),
            ("last_price", json!("612,40")),
            ("currency", json!("eur")),
            ("perf_day_eur", json!(0.012)),
            ("perf_ytd_eur", json!(-0.034)),
            ("geo_coverage", json!("{'FR': 80, 'US': 20}")),
        ]);

        let record = MarketRecord::from_row(&raw).unwrap();
        assert_eq!(record.ticker, "MC.PA");
        assert_eq!(record.last_price, Some(dec!(612.40)));
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.performance.day, Some(dec!(0.012)));
        assert_eq!(record.performance.ytd, Some(dec!(-0.034)));
        assert_eq!(record.geo_coverage.unwrap().len(), 2);
        assert_eq!(record.quality, DataQualityStatus::Ok);
    }

    #[test]
    fn test_v2_row_carries_indicators_and_status() {
        let raw = row(&[
            ("ticker", json!("AAPL")),
            ("name", json!("Apple Inc.")),
            ("last_price", json!(180.0)),
            ("currency", json!("USD")),
            ("instrument_type", json!("Equity")),
            ("status", json!("STALE")),
            ("rsi", json!(62.5)),
            ("macd", json!(1.2)),
            ("macd_signal", json!(0.8)),
            ("momentum", json!(4.1)),
            ("trend_state", json!("BULLISH")),
            ("trend_changed", json!("true")),
        ]);

        let record = MarketRecord::from_row(&raw).unwrap();
        assert_eq!(record.quality, DataQualityStatus::Stale);
        assert_eq!(record.instrument_type.as_deref(), Some("EQUITY"));
        let bundle = record.indicators.unwrap();
        assert_eq!(bundle.rsi, Some(62.5));
        assert_eq!(bundle.trend_state, Some(TrendState::Bullish));
        assert_eq!(bundle.trend_changed, Some(true));
    }

    #[test]
    fn test_unpriced_when_price_missing_or_non_positive() {
        let missing = MarketRecord::from_row(&row(&[("ticker", json!("X"))])).unwrap();
        assert!(!missing.is_priced());
        assert_eq!(missing.effective_price(), Decimal::ZERO);

        let negative = MarketRecord::from_row(&row(&[
            ("ticker", json!("X")),
            ("last_price", json!(-4.0)),
        ]))
        .unwrap();
        assert!(!negative.is_priced());
        assert_eq!(negative.effective_price(), Decimal::ZERO);
    }

    #[test]
    fn test_row_without_ticker_is_dropped() {
        let raw = row(&[("name", json!("orphan")), ("last_price", json!(10))]);
        assert!(MarketRecord::from_row(&raw).is_none());
        assert!(MarketRecord::map_from_rows(&[raw]).is_empty());
    }
}
