//! Grid paste translator.
//!
//! Walks `Row`/`Cell` elements of an XML Spreadsheet document and turns
//! them into value and clear callbacks on a destination grid. A single
//! linear pass: table extent, then rows (cells, spans) in document order,
//! then the erasure pass over the declared selection rectangle.
//!
//! All running state lives in a [`Traversal`] built per call, so one
//! translator can serve any number of parses.

use log::debug;
use serde::Serialize;

use crate::document::{SpreadsheetDocument, SpreadsheetElement, CELL_TAG, ROW_TAG};
use crate::error::PasteError;
use crate::extent::{TableExtent, TouchedCells};
use crate::index::resolve_index;
use crate::sink::PasteSink;
use crate::span::MergeSpan;
use crate::value::{decode_cell, DateBasis};

/// Where the paste lands and how large the destination grid is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasteTarget {
    /// Destination row of the selection's top-left cell (0-based).
    pub anchor_row: usize,
    /// Destination column of the selection's top-left cell (0-based).
    pub anchor_col: usize,
    /// Row count of the destination grid; rows at or past it are never written.
    pub grid_rows: usize,
    /// Column count of the destination grid.
    pub grid_cols: usize,
}

impl PasteTarget {
    pub fn new(anchor_row: usize, anchor_col: usize, grid_rows: usize, grid_cols: usize) -> Self {
        Self { anchor_row, anchor_col, grid_rows, grid_cols }
    }

    /// Whether `(row, col)` lies inside the destination grid.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.grid_rows && col < self.grid_cols
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasteOptions {
    pub date_basis: DateBasis,
}

/// What a completed parse did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PasteSummary {
    /// Value callbacks issued.
    pub values: usize,
    /// Clear callbacks issued.
    pub clears: usize,
    /// Row elements walked.
    pub rows: usize,
    /// Row elements skipped because they fell past the grid's last row.
    pub truncated_rows: usize,
    /// Cell elements skipped because they fell past the grid's last column.
    pub truncated_cells: usize,
    /// Declared selection extent; `None` means no erasure pass ran.
    pub extent: Option<TableExtent>,
}

pub struct GridPasteTranslator {
    target: PasteTarget,
    options: PasteOptions,
}

impl GridPasteTranslator {
    pub fn new(target: PasteTarget) -> Self {
        Self::with_options(target, PasteOptions::default())
    }

    pub fn with_options(target: PasteTarget, options: PasteOptions) -> Self {
        Self { target, options }
    }

    pub fn target(&self) -> PasteTarget {
        self.target
    }

    pub fn options(&self) -> PasteOptions {
        self.options
    }

    /// Translate `doc` into callbacks on `sink`.
    ///
    /// On error the walk stops where it is: callbacks already issued stand
    /// and the erasure pass is skipped.
    pub fn parse<D, S>(&self, doc: &D, sink: &mut S) -> Result<PasteSummary, PasteError>
    where
        D: SpreadsheetDocument,
        S: PasteSink + ?Sized,
    {
        let extent = TableExtent::read(doc)?;
        debug!("paste at {:?}, declared extent {:?}", self.target, extent);

        let mut walk = Traversal::new(self.target, self.options, extent, sink);
        let rows = doc.elements_by_tag(ROW_TAG);
        for (i, row) in rows.iter().enumerate() {
            if !walk.row(*row)? {
                walk.summary.truncated_rows = rows.len() - i;
                debug!("grid row limit {} reached, {} rows dropped", self.target.grid_rows, rows.len() - i);
                break;
            }
        }
        walk.erase();
        Ok(walk.summary)
    }
}

/// Move `cursor` by the gap between two successive 1-based indices, never
/// below `base`.
///
/// Saturates at `usize::MAX`, which every grid bound rejects.
fn advance(cursor: usize, old: usize, new: usize, base: usize) -> usize {
    if new > old {
        cursor.saturating_add(new - old - 1)
    } else {
        cursor.saturating_sub((old - new).saturating_add(1)).max(base)
    }
}

/// Per-parse walk state.
struct Traversal<'s, S: ?Sized> {
    target: PasteTarget,
    options: PasteOptions,
    sink: &'s mut S,
    // 1-based selection indices; 0 means "before the first".
    old_row: usize,
    new_row: usize,
    old_col: usize,
    new_col: usize,
    // Destination cursor.
    current_row: usize,
    current_col: usize,
    touched: Option<TouchedCells>,
    summary: PasteSummary,
}

impl<'s, S: PasteSink + ?Sized> Traversal<'s, S> {
    fn new(target: PasteTarget, options: PasteOptions, extent: Option<TableExtent>, sink: &'s mut S) -> Self {
        Self {
            target,
            options,
            sink,
            old_row: 0,
            new_row: 0,
            old_col: 0,
            new_col: 0,
            current_row: target.anchor_row,
            current_col: target.anchor_col,
            // Only the part of the selection that can land in the grid.
            touched: extent.map(|extent| {
                TouchedCells::new(extent.clamp(
                    target.grid_rows.saturating_sub(target.anchor_row),
                    target.grid_cols.saturating_sub(target.anchor_col),
                ))
            }),
            summary: PasteSummary { extent, ..Default::default() },
        }
    }

    /// Returns `false` once the row cursor has left the grid.
    fn row<E: SpreadsheetElement>(&mut self, row: &E) -> Result<bool, PasteError> {
        self.new_row = resolve_index(row, self.new_row)?;
        self.current_row = advance(self.current_row, self.old_row, self.new_row, self.target.anchor_row);
        if self.current_row >= self.target.grid_rows {
            return Ok(false);
        }
        self.summary.rows += 1;

        let cells = row.elements_by_tag(CELL_TAG);
        for (i, cell) in cells.iter().enumerate() {
            if !self.cell(*cell)? {
                self.summary.truncated_cells += cells.len() - i;
                break;
            }
        }

        self.current_col = self.target.anchor_col;
        self.current_row += 1;
        self.old_row = self.new_row;
        self.new_col = 0;
        self.old_col = 0;
        Ok(true)
    }

    /// Returns `false` once the column cursor has left the grid.
    fn cell<E: SpreadsheetElement>(&mut self, cell: &E) -> Result<bool, PasteError> {
        self.new_col = resolve_index(cell, self.new_col)?;
        self.current_col = advance(self.current_col, self.old_col, self.new_col, self.target.anchor_col);
        if self.current_col >= self.target.grid_cols {
            return Ok(false);
        }

        let value = decode_cell(cell, self.options.date_basis)?;
        let span = MergeSpan::read(cell)?;

        if let Some(value) = value {
            self.sink.on_value(self.current_row, self.current_col, value);
            self.summary.values += 1;
        }

        // Origin plus everything the merge covers; selection-relative.
        if let Some(touched) = self.touched.as_mut() {
            let TableExtent { rows, cols } = touched.extent();
            for (r, c) in span.covered(self.new_row - 1, self.new_col - 1, rows, cols) {
                touched.mark(r, c);
            }
        }
        self.current_col = self.current_col.saturating_add(span.across);
        self.new_col = self.new_col.saturating_add(span.across);

        self.current_col = self.current_col.saturating_add(1);
        self.old_col = self.new_col;
        Ok(true)
    }

    /// Clear every untouched position of the tracked extent that lands
    /// inside the grid.
    fn erase(&mut self) {
        let Some(touched) = self.touched.take() else {
            return;
        };
        for (r, c) in touched.untouched() {
            let (row, col) = (r + self.target.anchor_row, c + self.target.anchor_col);
            if self.target.contains(row, col) {
                self.sink.on_clear(row, col);
                self.summary.clears += 1;
            }
        }
    }
}
