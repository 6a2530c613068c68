//! `pastegrid-engine`: XML Spreadsheet clipboard payloads to grid assignments.
//!
//! Pure engine crate: receives an already-parsed document, reports values
//! and clears through a [`PasteSink`]. No IO dependencies.

pub mod document;
pub mod error;
pub mod extent;
pub mod index;
pub mod sink;
pub mod span;
pub mod translator;
pub mod value;

#[cfg(test)]
pub mod harness;

pub use document::{SpreadsheetDocument, SpreadsheetElement};
pub use error::PasteError;
pub use extent::{TableExtent, TouchedCells};
pub use sink::{FnSink, PasteOp, PasteOps, PasteSink};
pub use span::MergeSpan;
pub use translator::{GridPasteTranslator, PasteOptions, PasteSummary, PasteTarget};
pub use value::{DateBasis, PasteValue};
