//! FX module - the currency rate table mapping quote currencies to the
//! base currency.

mod fx_model;
mod rate_table;

pub use fx_model::CurrencyRate;
pub use rate_table::RateTable;
