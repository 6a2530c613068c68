//! Merged-cell spans (`ss:MergeAcross`, `ss:MergeDown`).

use crate::document::{SpreadsheetElement, MERGE_ACROSS_ATTR, MERGE_DOWN_ATTR};
use crate::error::PasteError;
use crate::extent::parse_count;

/// Extra columns (`across`) and rows (`down`) a cell covers beyond its
/// origin. Only the origin carries a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSpan {
    pub across: usize,
    pub down: usize,
}

impl MergeSpan {
    pub fn read<E: SpreadsheetElement>(cell: &E) -> Result<Self, PasteError> {
        Ok(Self {
            across: parse_count(cell, MERGE_ACROSS_ATTR)?.unwrap_or(0),
            down: parse_count(cell, MERGE_DOWN_ATTR)?.unwrap_or(0),
        })
    }

    pub fn is_merged(&self) -> bool {
        self.across > 0 || self.down > 0
    }

    /// Every position the merge occupies below `rows` x `cols`, origin
    /// first, row-major.
    pub fn covered(
        &self,
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = (usize, usize)> {
        let row_end = row.saturating_add(self.down).saturating_add(1).min(rows);
        let col_end = col.saturating_add(self.across).saturating_add(1).min(cols);
        (row..row_end).flat_map(move |r| (col..col_end).map(move |c| (r, c)))
    }
}
