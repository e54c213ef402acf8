use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::market_data::{MarketRecord, PerformanceHorizon};
use crate::portfolio::holdings::Holding;

use super::{country_info, normalize_coverage, CountryExposure, MarketRegion};

#[derive(Default)]
struct CountryAccumulator {
    exposure: Decimal,
    weighted_performance: Decimal,
    has_performance: bool,
    instrument_count: usize,
}

/// Builds the country-level exposure breakdown from consolidated holdings.
pub struct GeoExposureService;

impl GeoExposureService {
    pub fn new() -> Self {
        GeoExposureService
    }

    /// Country exposures for one performance horizon, sorted by
    /// descending exposure. Holdings without positive exposure are
    /// skipped; per-country performance is the exposure-weighted mean of
    /// the contributing instruments' horizon performance.
    pub fn build_exposures(
        &self,
        holdings: &[Holding],
        market: &HashMap<String, MarketRecord>,
        horizon: PerformanceHorizon,
    ) -> Vec<CountryExposure> {
        let mut accumulators: HashMap<String, CountryAccumulator> = HashMap::new();

        for holding in holdings {
            if holding.market_value_base <= Decimal::ZERO {
                continue;
            }

            // Holdings aggregated without any coverage source still get
            // the exchange-convention fallback here.
            let weights = if holding.country_weights.is_empty() {
                normalize_coverage(None, &holding.ticker)
            } else {
                holding.country_weights.clone()
            };

            let performance = market
                .get(&holding.ticker)
                .and_then(|m| m.performance.horizon(horizon));

            for (country, weight) in weights {
                let exposure = holding.market_value_base * weight / dec!(100);
                if exposure <= Decimal::ZERO {
                    continue;
                }
                let entry = accumulators.entry(country).or_default();
                entry.exposure += exposure;
                entry.instrument_count += 1;
                if let Some(perf) = performance {
                    entry.weighted_performance += perf * exposure;
                    entry.has_performance = true;
                }
            }
        }

        let grand_total: Decimal = accumulators.values().map(|a| a.exposure).sum();
        debug!(
            "Geographic exposure across {} countries, total {}",
            accumulators.len(),
            grand_total
        );

        let mut exposures: Vec<CountryExposure> = accumulators
            .into_iter()
            .map(|(code, acc)| {
                let info = country_info(&code);
                let performance = if acc.has_performance {
                    Some(acc.weighted_performance / acc.exposure)
                } else {
                    None
                };
                let exposure_pct = if grand_total > Decimal::ZERO {
                    (acc.exposure * dec!(100) / grand_total).round_dp(DISPLAY_DECIMAL_PRECISION)
                } else {
                    Decimal::ZERO
                };
                CountryExposure {
                    name: info.map(|i| i.name.to_string()).unwrap_or_else(|| code.clone()),
                    latitude: info.map(|i| i.latitude).unwrap_or(0.0),
                    longitude: info.map(|i| i.longitude).unwrap_or(0.0),
                    exposure_base: acc.exposure,
                    exposure_pct,
                    performance,
                    instrument_count: acc.instrument_count,
                    code,
                }
            })
            .collect();

        exposures.sort_by(|a, b| b.exposure_base.cmp(&a.exposure_base).then(a.code.cmp(&b.code)));
        exposures
    }

    /// Lighter map-rendering view derived from the exposure table.
    pub fn build_regions(
        &self,
        holdings: &[Holding],
        market: &HashMap<String, MarketRecord>,
        horizon: PerformanceHorizon,
    ) -> Vec<MarketRegion> {
        self.build_exposures(holdings, market, horizon)
            .iter()
            .map(MarketRegion::from)
            .collect()
    }
}

impl Default for GeoExposureService {
    fn default() -> Self {
        Self::new()
    }
}
