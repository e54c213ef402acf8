//! Row store seam.
//!
//! Persistence is an external collaborator: the dashboard's row store is
//! queried by table name and column list and may be backed by anything
//! that returns JSON rows. The core only defines the trait; callers
//! fetch the snapshot and hand the rows to
//! [`DashboardInput::from_rows`](crate::portfolio::overview::DashboardInput::from_rows).

use crate::errors::Result;
use crate::ingest::RawRow;

/// Read access to the external row store.
///
/// Implementations should return whatever columns exist: missing columns
/// are tolerated downstream through the ordered schema candidates in
/// [`crate::ingest`], so requesting a superset of columns is safe.
pub trait RowStoreTrait: Send + Sync {
    /// Fetches all rows of `table`, restricted to `columns` where the
    /// backend supports projection.
    fn fetch(&self, table: &str, columns: &[&str]) -> Result<Vec<RawRow>>;
}
