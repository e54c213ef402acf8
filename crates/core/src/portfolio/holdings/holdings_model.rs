use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::market_data::DataQualityStatus;

/// Consolidated view of one instrument across all portfolios in scope.
///
/// Recomputed wholesale on every aggregation run from a fresh snapshot;
/// never mutated incrementally. An instrument held but absent from the
/// market rows still yields a `Holding` with a zero price so it stays
/// visible in the dashboard instead of silently dropping out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub ticker: String,
    pub name: String,
    /// Quote currency of the instrument; base currency when untracked.
    pub currency: String,
    /// Zero when the instrument is unpriced.
    pub last_price: Decimal,
    pub quality: DataQualityStatus,
    /// Asset class from the market row, used by the governance engine.
    pub asset_class: Option<String>,

    pub quantity_current: Decimal,
    pub quantity_buy: Decimal,
    /// Value-weighted average acquisition cost (PRU) per unit, in the
    /// instrument's quote currency. `None` when no position supplies one.
    pub average_cost: Option<Decimal>,
    /// Value-weighted mean of the contributing positions' target weights.
    pub target_weight_pct: Option<Decimal>,

    pub market_value_base: Decimal,
    /// Acquisition value in base currency; only computed when at least
    /// one contributing position has a known cost.
    pub invested_value_base: Option<Decimal>,
    pub gain_base: Option<Decimal>,
    pub gain_pct: Option<Decimal>,

    /// Identifiers of every portfolio contributing to this holding.
    pub portfolio_ids: Vec<String>,
    /// Country weights re-normalized to percentages summing to 100,
    /// weighted by each contributing position's market value.
    pub country_weights: HashMap<String, Decimal>,
}

impl Holding {
    pub fn is_priced(&self) -> bool {
        self.last_price > Decimal::ZERO
    }
}
