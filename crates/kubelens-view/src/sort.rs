use std::cmp::Reverse;

use kubelens_types::{Column, FieldValue, PresentationRow, SortDirection, SortKey, SortSpec};

fn key_of(row: &PresentationRow, column: &str) -> Option<SortKey> {
    row.get(column).map(FieldValue::sort_key)
}

/// Whether `key` names a declared column that takes part in sorting
pub fn is_sortable(columns: &[Column], key: &str) -> bool {
    columns.iter().any(|c| c.key == key && c.sortable)
}

/// Order rows by the sort key of `spec.column`
///
/// Rows are left untouched when the column is not declared or not sortable.
pub fn sort_rows(rows: &mut [PresentationRow], spec: &SortSpec) {
    let column = spec.column.as_str();
    let Some(first) = rows.first() else {
        return;
    };
    if !is_sortable(first.columns(), column) {
        return;
    }

    match spec.direction {
        SortDirection::Ascending => rows.sort_by_cached_key(|r| key_of(r, column)),
        SortDirection::Descending => rows.sort_by_cached_key(|r| Reverse(key_of(r, column))),
    }
}

/// Sort order kept across refreshes of the same list
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortState {
    spec: SortSpec,
}

impl SortState {
    pub fn new(spec: SortSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    /// Column header activated: same column flips direction, new column sorts ascending
    pub fn select(&mut self, column: &str) -> &SortSpec {
        if self.spec.column == column {
            self.spec.direction = self.spec.direction.toggled();
        } else {
            self.spec = SortSpec::ascending(column);
        }
        &self.spec
    }

    pub fn apply(&self, rows: &mut [PresentationRow]) {
        sort_rows(rows, &self.spec);
    }
}
