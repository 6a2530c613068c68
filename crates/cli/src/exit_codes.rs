//! CLI Exit Code Registry
//!
//! Single source of truth for `pgrid` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad anchor, bad option value)           |
//! | 3    | IO error (unreadable input, stdout closed)           |
//! | 4    | Input is not well-formed XML                         |
//! | 5    | Payload decode error (bad ss:Index, date or count)   |

use pastegrid_engine::PasteError;
use pastegrid_io::IoError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
#[allow(dead_code)]
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, malformed anchor.
pub const EXIT_USAGE: u8 = 2;

/// Input could not be read or output could not be written.
pub const EXIT_IO: u8 = 3;

/// The payload is not well-formed XML.
pub const EXIT_XML: u8 = 4;

/// The XML is fine but a cell could not be decoded.
pub const EXIT_DECODE: u8 = 5;

/// Map an IO-crate error to its exit code.
pub fn io_exit_code(err: &IoError) -> u8 {
    match err {
        IoError::Io(_) => EXIT_IO,
        IoError::Xml { .. } | IoError::Malformed(_) | IoError::Empty => EXIT_XML,
    }
}

/// Every engine error is a decode failure.
pub fn paste_exit_code(_err: &PasteError) -> u8 {
    EXIT_DECODE
}
