use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, HashMap};

use crate::constants::PORTFOLIO_ALL_ID;
use crate::fx::RateTable;
use crate::market_data::{DataQualityStatus, MarketRecord};
use crate::portfolio::geo::normalize_coverage;
use crate::positions::PositionRecord;

use super::Holding;

/// Position aggregator: consolidates per-portfolio position rows into one
/// `Holding` per ticker, FX-normalized to the base currency.
///
/// Pure per run: each call works on the snapshot it is given and shares
/// no state with other runs.
pub struct HoldingsService {
    base_currency: String,
}

impl HoldingsService {
    pub fn new(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into().to_uppercase(),
        }
    }

    /// Aggregates position rows into consolidated holdings.
    ///
    /// `filter` restricts the run to one portfolio id; `None` or the
    /// synthetic `ALL` id aggregates across every portfolio. Output is
    /// ordered by case-insensitive name.
    pub fn aggregate(
        &self,
        positions: &[PositionRecord],
        market: &HashMap<String, MarketRecord>,
        rates: &RateTable,
        filter: Option<&str>,
    ) -> Vec<Holding> {
        let scope = filter.filter(|id| *id != PORTFOLIO_ALL_ID);

        // BTreeMap keeps grouping deterministic across runs.
        let mut by_ticker: BTreeMap<&str, Vec<&PositionRecord>> = BTreeMap::new();
        for position in positions {
            if scope.is_some_and(|id| id != position.portfolio_id) {
                continue;
            }
            by_ticker
                .entry(position.ticker.as_str())
                .or_default()
                .push(position);
        }

        debug!(
            "Aggregating {} tickers for portfolio filter {:?}",
            by_ticker.len(),
            scope
        );

        let mut holdings: Vec<Holding> = by_ticker
            .into_iter()
            .map(|(ticker, contributing)| {
                self.build_holding(ticker, &contributing, market.get(ticker), rates)
            })
            .collect();

        holdings.sort_by(|a, b| {
            (a.name.to_lowercase(), &a.ticker).cmp(&(b.name.to_lowercase(), &b.ticker))
        });
        holdings
    }

    fn build_holding(
        &self,
        ticker: &str,
        positions: &[&PositionRecord],
        market: Option<&MarketRecord>,
        rates: &RateTable,
    ) -> Holding {
        let price = market.map(|m| m.effective_price()).unwrap_or(Decimal::ZERO);
        let currency = market
            .map(|m| m.currency.clone())
            .unwrap_or_else(|| self.base_currency.clone());
        let fx_rate = rates.rate(&currency);

        if market.is_none() {
            warn!("No market record for held ticker {}, keeping it visible unpriced", ticker);
        }

        let mut quantity_current = Decimal::ZERO;
        let mut quantity_buy = Decimal::ZERO;
        let mut market_value_base = Decimal::ZERO;
        let mut cost_quantity = Decimal::ZERO;
        let mut cost_sum = Decimal::ZERO;
        let mut invested_base = Decimal::ZERO;
        let mut target_weight_sum = Decimal::ZERO;
        let mut target_weight_basis = Decimal::ZERO;
        let mut portfolio_ids: Vec<String> = Vec::new();
        let mut country_values: HashMap<String, Decimal> = HashMap::new();
        let mut any_position_coverage = false;

        for position in positions {
            let qty_current = position.effective_quantity_current();
            let qty_buy = position.effective_quantity_buy();
            let value_base = qty_current * price * fx_rate;

            quantity_current += qty_current;
            quantity_buy += qty_buy;
            market_value_base += value_base;

            if position.has_cost_basis() {
                let pru = position.average_cost.unwrap_or(Decimal::ZERO);
                cost_sum += pru * qty_buy;
                cost_quantity += qty_buy;
                invested_base += pru * qty_buy * fx_rate;
            }

            if let Some(target) = position.target_weight_pct {
                // A zero-value position still weighs in with its quantity
                // so the target does not degenerate to zero.
                let basis = if value_base > Decimal::ZERO {
                    value_base
                } else {
                    qty_current.max(Decimal::ONE)
                };
                target_weight_sum += target * basis;
                target_weight_basis += basis;
            }

            if !portfolio_ids.contains(&position.portfolio_id) {
                portfolio_ids.push(position.portfolio_id.clone());
            }

            if let Some(coverage) = &position.geo_coverage {
                any_position_coverage = true;
                for (country, weight) in normalize_coverage(Some(coverage), ticker) {
                    *country_values.entry(country).or_insert(Decimal::ZERO) +=
                        value_base * weight / dec!(100);
                }
            }
        }

        // No position-level override anywhere: fall back to the market
        // record's own coverage (or the ticker's exchange convention).
        if !any_position_coverage {
            let market_coverage = market.and_then(|m| m.geo_coverage.as_ref());
            for (country, weight) in normalize_coverage(market_coverage, ticker) {
                *country_values.entry(country).or_insert(Decimal::ZERO) +=
                    market_value_base * weight / dec!(100);
            }
        }

        let average_cost = if cost_quantity > Decimal::ZERO {
            Some(cost_sum / cost_quantity)
        } else {
            None
        };
        let invested_value_base = if cost_quantity > Decimal::ZERO {
            Some(invested_base)
        } else {
            None
        };
        let target_weight_pct = if target_weight_basis > Decimal::ZERO {
            Some(target_weight_sum / target_weight_basis)
        } else {
            None
        };

        let gain_base = invested_value_base.map(|invested| market_value_base - invested);
        let gain_pct = invested_value_base.and_then(|invested| {
            if invested > Decimal::ZERO {
                Some((market_value_base / invested - Decimal::ONE) * dec!(100))
            } else {
                None
            }
        });

        portfolio_ids.sort();

        Holding {
            ticker: ticker.to_string(),
            name: market.map(|m| m.name.clone()).unwrap_or_else(|| ticker.to_string()),
            currency,
            last_price: price,
            quality: market.map(|m| m.quality).unwrap_or(DataQualityStatus::Partial),
            asset_class: market.and_then(|m| m.instrument_type.clone()),
            quantity_current,
            quantity_buy,
            average_cost,
            target_weight_pct,
            market_value_base,
            invested_value_base,
            gain_base,
            gain_pct,
            portfolio_ids,
            country_weights: rescale_to_percentages(country_values),
        }
    }
}

/// Rescales accumulated per-country values into percentages summing
/// to 100. An all-zero accumulator yields an empty map.
fn rescale_to_percentages(values: HashMap<String, Decimal>) -> HashMap<String, Decimal> {
    let total: Decimal = values.values().sum();
    if total <= Decimal::ZERO {
        return HashMap::new();
    }
    values
        .into_iter()
        .map(|(country, value)| (country, value * dec!(100) / total))
        .collect()
}
