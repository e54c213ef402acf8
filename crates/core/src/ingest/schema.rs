use serde_json::Value;

use super::RawRow;

/// One candidate column layout for a source table.
///
/// Source tables went through several schema revisions (and the oldest
/// sheets carry French headers), so each logical field maps to the column
/// name used by this particular revision. Candidates are probed in order
/// and the first one whose required columns are all present wins.
#[derive(Debug, Clone, Copy)]
pub struct FieldSet {
    /// Identifier used in log messages.
    pub name: &'static str,
    /// (logical field, column header) pairs.
    pub fields: &'static [(&'static str, &'static str)],
    /// Logical fields that must be present for this candidate to resolve.
    pub required: &'static [&'static str],
}

impl FieldSet {
    /// Column header backing a logical field in this layout.
    pub fn column(&self, logical: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(field, _)| *field == logical)
            .map(|(_, column)| *column)
    }

    /// Raw value of a logical field, if the column exists in the row.
    pub fn get<'a>(&self, row: &'a RawRow, logical: &str) -> Option<&'a Value> {
        row.get(self.column(logical)?)
    }

    fn resolves(&self, row: &RawRow) -> bool {
        self.required.iter().all(|logical| {
            self.column(logical)
                .map_or(false, |column| row.contains_key(column))
        })
    }
}

/// Returns the first candidate layout whose required columns all resolve
/// against the given row, or `None` when no candidate matches.
pub fn probe<'a>(row: &RawRow, candidates: &'a [FieldSet]) -> Option<&'a FieldSet> {
    candidates.iter().find(|candidate| candidate.resolves(row))
}
