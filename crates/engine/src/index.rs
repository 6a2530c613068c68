//! Row/cell index resolution.
//!
//! XML Spreadsheet omits `ss:Index` whenever an element directly follows
//! its predecessor. Indices are 1-based; `previous` starts at 0 so the
//! first implicit element resolves to 1.

use crate::document::{SpreadsheetElement, INDEX_ATTR};
use crate::error::PasteError;

/// Absolute 1-based index of `element`: its explicit `ss:Index`, or
/// `previous + 1` when absent.
pub fn resolve_index<E: SpreadsheetElement>(element: &E, previous: usize) -> Result<usize, PasteError> {
    let Some(raw) = element.attribute(INDEX_ATTR) else {
        return previous.checked_add(1).ok_or_else(|| PasteError::InvalidIndex {
            tag: element.tag().to_string(),
            value: format!("{previous} + 1"),
        });
    };

    match raw.trim().parse::<usize>() {
        Ok(index) if index >= 1 => Ok(index),
        _ => Err(PasteError::InvalidIndex {
            tag: element.tag().to_string(),
            value: raw.to_string(),
        }),
    }
}
