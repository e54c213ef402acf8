//! Row ingestion - best-effort coercion of loosely-typed external rows.
//!
//! Upstream sync jobs write rows with string numbers, comma decimals,
//! single-quoted JSON blobs and column names that drifted over time. This
//! module turns those rows into typed values without ever failing: a field
//! that cannot be coerced becomes `None`, and defaulting is left to the
//! consuming layer.

mod row_values;
mod schema;

pub use row_values::{
    coerce_bool, coerce_coverage, coerce_decimal, coerce_f64, coerce_string, coerce_timestamp,
    RawRow,
};
pub use schema::{probe, FieldSet};
