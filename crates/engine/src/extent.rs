//! Declared selection extent and the per-parse touched bitmap.
//!
//! Excel writes `ss:ExpandedRowCount` / `ss:ExpandedColumnCount` on the
//! `<Table>` of a clipboard payload. When both are known, every position of
//! that rectangle that the walk does not populate gets cleared afterwards.

use log::debug;
use serde::Serialize;

use crate::document::{
    SpreadsheetDocument, SpreadsheetElement, COLUMN_COUNT_ATTR, ROW_COUNT_ATTR, TABLE_TAG,
};
use crate::error::PasteError;

/// Size of the copied selection, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableExtent {
    pub rows: usize,
    pub cols: usize,
}

impl TableExtent {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Read the extent from the document's single `<Table>`.
    ///
    /// Returns `None` (erasure disabled) when there is not exactly one table
    /// or either count is missing or zero.
    pub fn read<D: SpreadsheetDocument>(doc: &D) -> Result<Option<Self>, PasteError> {
        let tables = doc.elements_by_tag(TABLE_TAG);
        let [table] = tables.as_slice() else {
            debug!("{} <Table> elements, erasure disabled", tables.len());
            return Ok(None);
        };

        let rows = parse_count(*table, ROW_COUNT_ATTR)?.unwrap_or(0);
        let cols = parse_count(*table, COLUMN_COUNT_ATTR)?.unwrap_or(0);
        if rows == 0 || cols == 0 {
            debug!("table extent incomplete ({rows}x{cols}), erasure disabled");
            return Ok(None);
        }
        Ok(Some(Self { rows, cols }))
    }

    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    /// The part of this extent that fits in `rows` x `cols`.
    pub fn clamp(&self, rows: usize, cols: usize) -> Self {
        Self { rows: self.rows.min(rows), cols: self.cols.min(cols) }
    }
}

/// Parse an optional non-negative count attribute.
pub(crate) fn parse_count<E: SpreadsheetElement>(
    element: &E,
    attribute: &str,
) -> Result<Option<usize>, PasteError> {
    match element.attribute(attribute) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<usize>().map(Some).map_err(|_| {
            PasteError::InvalidCount {
                attribute: attribute.to_string(),
                value: raw.to_string(),
            }
        }),
    }
}

/// Selection-relative record of which positions were populated or covered
/// by a merge. Row vectors are allocated on first mark.
///
/// Sized by the caller; the translator passes the declared extent clamped to
/// what can land inside the destination grid.
#[derive(Debug, Clone)]
pub struct TouchedCells {
    extent: TableExtent,
    rows: Vec<Option<Vec<bool>>>,
}

impl TouchedCells {
    pub fn new(extent: TableExtent) -> Self {
        Self { extent, rows: vec![None; extent.rows] }
    }

    pub fn extent(&self) -> TableExtent {
        self.extent
    }

    /// Mark a 0-based selection position. Positions outside the declared
    /// extent are dropped.
    pub fn mark(&mut self, row: usize, col: usize) {
        if row >= self.extent.rows || col >= self.extent.cols {
            debug!(
                "touched ({row}, {col}) lies outside the tracked {}x{} extent",
                self.extent.rows, self.extent.cols
            );
            return;
        }
        let cols = self.extent.cols;
        let bits = self.rows[row].get_or_insert_with(|| vec![false; cols]);
        bits[col] = true;
    }

    pub fn is_touched(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.as_ref())
            .and_then(|bits| bits.get(col).copied())
            .unwrap_or(false)
    }

    /// Number of rows that received at least one mark.
    pub fn allocated_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.is_some()).count()
    }

    /// Every unmarked position of the declared rectangle, row-major.
    /// Rows that were never allocated are reported in full.
    pub fn untouched(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.extent.cols;
        self.rows.iter().enumerate().flat_map(move |(r, bits)| {
            (0..cols)
                .filter(move |&c| !bits.as_ref().is_some_and(|b| b[c]))
                .map(move |c| (r, c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::{workbook, Doc, Node};

    #[test]
    fn reads_both_counts() {
        let doc = workbook(Some((3, 4)), vec![]);
        assert_eq!(TableExtent::read(&doc), Ok(Some(TableExtent::new(3, 4))));
    }

    #[test]
    fn missing_or_zero_count_disables_erasure() {
        let only_rows = Doc(Node::new("Workbook").child(
            Node::new("Table").attr("ss:ExpandedRowCount", "3"),
        ));
        assert_eq!(TableExtent::read(&only_rows), Ok(None));

        let zero = Doc(Node::new("Table")
            .attr("ss:ExpandedRowCount", "0")
            .attr("ss:ExpandedColumnCount", "2"));
        assert_eq!(TableExtent::read(&zero), Ok(None));
    }

    #[test]
    fn several_tables_disable_erasure() {
        let table = || {
            Node::new("Table")
                .attr("ss:ExpandedRowCount", "1")
                .attr("ss:ExpandedColumnCount", "1")
        };
        let doc = Doc(Node::new("Workbook").child(table()).child(table()));
        assert_eq!(TableExtent::read(&doc), Ok(None));
    }

    #[test]
    fn malformed_count_is_an_error() {
        let doc = Doc(Node::new("Table")
            .attr("ss:ExpandedRowCount", "many")
            .attr("ss:ExpandedColumnCount", "2"));
        assert!(matches!(
            TableExtent::read(&doc),
            Err(PasteError::InvalidCount { ref attribute, .. }) if attribute == "ss:ExpandedRowCount"
        ));
    }

    #[test]
    fn clamp_keeps_the_smaller_side() {
        let declared = TableExtent::new(10_000_000_000_000, 2);
        assert_eq!(declared.clamp(5, 16_384), TableExtent::new(5, 2));
        assert_eq!(declared.clamp(0, 1), TableExtent::new(0, 1));
        assert_eq!(declared.cell_count(), 20_000_000_000_000);
        assert_eq!(TableExtent::new(usize::MAX, 2).cell_count(), usize::MAX);
    }

    #[test]
    fn rows_allocate_lazily() {
        let mut touched = TouchedCells::new(TableExtent::new(4, 2));
        assert_eq!(touched.allocated_rows(), 0);

        touched.mark(2, 1);
        assert_eq!(touched.allocated_rows(), 1);
        assert!(touched.is_touched(2, 1));
        assert!(!touched.is_touched(2, 0));
        assert!(!touched.is_touched(0, 0));
    }

    #[test]
    fn out_of_extent_marks_are_dropped() {
        let mut touched = TouchedCells::new(TableExtent::new(1, 1));
        touched.mark(0, 5);
        touched.mark(3, 0);
        assert_eq!(touched.allocated_rows(), 0);
        assert_eq!(touched.untouched().count(), 1);
    }

    #[test]
    fn untouched_covers_unallocated_rows() {
        let mut touched = TouchedCells::new(TableExtent::new(3, 2));
        touched.mark(0, 0);
        touched.mark(1, 0);
        touched.mark(1, 1);

        let rest: Vec<_> = touched.untouched().collect();
        assert_eq!(rest, vec![(0, 1), (2, 0), (2, 1)]);
    }
}
