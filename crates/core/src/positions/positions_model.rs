use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ingest::{coerce_coverage, coerce_decimal, coerce_string, probe, FieldSet, RawRow};

/// One row per (portfolio, ticker) pair.
///
/// Quantities and cost stay `None` when the source could not be coerced;
/// the accessors apply the documented defaults so the aggregation layer
/// decides, not the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub portfolio_id: String,
    pub ticker: String,
    pub quantity_buy: Option<Decimal>,
    pub quantity_current: Option<Decimal>,
    /// Average acquisition cost per unit (PRU).
    pub average_cost: Option<Decimal>,
    pub target_weight_pct: Option<Decimal>,
    /// Per-position override of the instrument's country-weight map.
    pub geo_coverage: Option<HashMap<String, Decimal>>,
}

const POSITION_SCHEMAS: &[FieldSet] = &[
    FieldSet {
        name: "positions_v2",
        fields: &[
            ("portfolio_id", "portfolio_id"),
            ("ticker", "ticker"),
            ("quantity_buy", "quantity_buy"),
            ("quantity_current", "quantity_current"),
            ("average_cost", "pru"),
            ("target_weight_pct", "target_weight_pct"),
            ("geo_coverage", "geo_coverage"),
        ],
        required: &["portfolio_id", "ticker"],
    },
    FieldSet {
        name: "positions_sheet",
        fields: &[
            ("portfolio_id", "portefeuille"),
            ("ticker", "ticker"),
            ("quantity_buy", "quantite_achat"),
            ("quantity_current", "quantite_actuelle"),
            ("average_cost", "pru"),
            ("target_weight_pct", "poids_cible"),
            ("geo_coverage", "couverture_geo"),
        ],
        required: &["portefeuille", "ticker"],
    },
];

impl PositionRecord {
    /// Best-effort parse of one position row; `None` when no layout
    /// resolves both join keys.
    pub fn from_row(row: &RawRow) -> Option<PositionRecord> {
        let schema = probe(row, POSITION_SCHEMAS)?;
        let portfolio_id = coerce_string(schema.get(row, "portfolio_id"))?;
        let ticker = coerce_string(schema.get(row, "ticker"))?.to_uppercase();

        Some(PositionRecord {
            portfolio_id,
            ticker,
            quantity_buy: non_negative(coerce_decimal(schema.get(row, "quantity_buy"))),
            quantity_current: non_negative(coerce_decimal(schema.get(row, "quantity_current"))),
            average_cost: non_negative(coerce_decimal(schema.get(row, "average_cost"))),
            target_weight_pct: coerce_decimal(schema.get(row, "target_weight_pct")),
            geo_coverage: coerce_coverage(schema.get(row, "geo_coverage")),
        })
    }

    pub fn vec_from_rows(rows: &[RawRow]) -> Vec<PositionRecord> {
        rows.iter().filter_map(PositionRecord::from_row).collect()
    }

    /// Current quantity, defaulting to the acquired quantity when absent.
    pub fn effective_quantity_current(&self) -> Decimal {
        self.quantity_current
            .or(self.quantity_buy)
            .unwrap_or(Decimal::ZERO)
    }

    /// Acquired quantity, zero when absent.
    pub fn effective_quantity_buy(&self) -> Decimal {
        self.quantity_buy.unwrap_or(Decimal::ZERO)
    }

    /// True when the position carries a usable cost basis.
    pub fn has_cost_basis(&self) -> bool {
        self.average_cost.is_some() && self.effective_quantity_buy() > Decimal::ZERO
    }
}

fn non_negative(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v >= Decimal::ZERO)
}

/// Portfolio identity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    pub id: String,
    pub name: String,
}

const PORTFOLIO_SCHEMAS: &[FieldSet] = &[
    FieldSet {
        name: "portfolios_v2",
        fields: &[("id", "id"), ("name", "name")],
        required: &["id"],
    },
    FieldSet {
        name: "portfolios_sheet",
        fields: &[("id", "id"), ("name", "nom")],
        required: &["id"],
    },
];

impl PortfolioRecord {
    pub fn from_row(row: &RawRow) -> Option<PortfolioRecord> {
        let schema = probe(row, PORTFOLIO_SCHEMAS)?;
        let id = coerce_string(schema.get(row, "id"))?;
        Some(PortfolioRecord {
            name: coerce_string(schema.get(row, "name")).unwrap_or_else(|| id.clone()),
            id,
        })
    }

    pub fn vec_from_rows(rows: &[RawRow]) -> Vec<PortfolioRecord> {
        rows.iter().filter_map(PortfolioRecord::from_row).collect()
    }
}

/// Governance target for one asset class within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocation {
    pub portfolio_id: String,
    pub asset_class: String,
    pub target_pct: Decimal,
    pub tolerance_band: Option<Decimal>,
}

const TARGET_SCHEMAS: &[FieldSet] = &[
    FieldSet {
        name: "targets_v2",
        fields: &[
            ("portfolio_id", "portfolio_id"),
            ("asset_class", "asset_class"),
            ("target_pct", "target_pct"),
            ("tolerance_band", "tolerance_band"),
        ],
        required: &["portfolio_id", "asset_class"],
    },
    FieldSet {
        name: "targets_sheet",
        fields: &[
            ("portfolio_id", "portefeuille"),
            ("asset_class", "classe_actif"),
            ("target_pct", "cible_pct"),
            ("tolerance_band", "bande"),
        ],
        required: &["portefeuille", "classe_actif"],
    },
];

impl TargetAllocation {
    pub fn from_row(row: &RawRow) -> Option<TargetAllocation> {
        let schema = probe(row, TARGET_SCHEMAS)?;
        Some(TargetAllocation {
            portfolio_id: coerce_string(schema.get(row, "portfolio_id"))?,
            asset_class: coerce_string(schema.get(row, "asset_class"))?.to_uppercase(),
            target_pct: coerce_decimal(schema.get(row, "target_pct"))?,
            tolerance_band: non_negative(coerce_decimal(schema.get(row, "tolerance_band"))),
        })
    }

    pub fn vec_from_rows(rows: &[RawRow]) -> Vec<TargetAllocation> {
        rows.iter().filter_map(TargetAllocation::from_row).collect()
    }
}
