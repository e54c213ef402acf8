use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ingest::{coerce_decimal, coerce_string, probe, FieldSet, RawRow};

/// One currency-pair snapshot row: multiplier from `code` to the base
/// currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub code: String,
    pub symbol: Option<String>,
    pub rate_to_base: Option<Decimal>,
}

const CURRENCY_SCHEMAS: &[FieldSet] = &[
    FieldSet {
        name: "currencies_v2",
        fields: &[
            ("code", "code"),
            ("symbol", "symbol"),
            ("rate_to_base", "rate_to_base"),
        ],
        required: &["code"],
    },
    FieldSet {
        name: "currencies_sync",
        fields: &[
            ("code", "id"),
            ("symbol", "symbol"),
            ("rate_to_base", "rate_to_eur"),
        ],
        required: &["id"],
    },
];

impl CurrencyRate {
    pub fn from_row(row: &RawRow) -> Option<CurrencyRate> {
        let schema = probe(row, CURRENCY_SCHEMAS)?;
        Some(CurrencyRate {
            code: coerce_string(schema.get(row, "code"))?.to_uppercase(),
            symbol: coerce_string(schema.get(row, "symbol")),
            rate_to_base: coerce_decimal(schema.get(row, "rate_to_base")),
        })
    }

    pub fn vec_from_rows(rows: &[RawRow]) -> Vec<CurrencyRate> {
        rows.iter().filter_map(CurrencyRate::from_row).collect()
    }
}
