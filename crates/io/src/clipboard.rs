//! Clipboard payload handling.
//!
//! Talking to the OS clipboard is the host's job. This module covers what
//! happens between "the host handed us the formats/bytes" and "we have a
//! document": picking the XML Spreadsheet flavour and turning its raw bytes
//! into text.

use encoding_rs::{Encoding, WINDOWS_1252};
use log::debug;

use crate::error::IoError;
use crate::tree::XmlDocument;

/// Clipboard format name Excel registers for the XML Spreadsheet flavour.
pub const XML_SPREADSHEET_FORMAT: &str = "XML Spreadsheet";

/// One clipboard flavour as reported by the host. A flavour can carry
/// several names (MIME type, platform name, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardFormat {
    pub identifiers: Vec<String>,
}

impl ClipboardFormat {
    pub fn new<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { identifiers: identifiers.into_iter().map(Into::into).collect() }
    }

    pub fn is_xml_spreadsheet(&self) -> bool {
        self.identifiers.iter().any(|id| id == XML_SPREADSHEET_FORMAT)
    }
}

/// First flavour that carries the XML Spreadsheet name.
pub fn find_xml_format(formats: &[ClipboardFormat]) -> Option<&ClipboardFormat> {
    formats.iter().find(|f| f.is_xml_spreadsheet())
}

/// Raw clipboard bytes to text.
///
/// A BOM selects UTF-8 or UTF-16; otherwise UTF-8 is tried first and
/// Windows-1252 is the fallback. NUL terminators some platforms append are
/// dropped.
pub fn decode_payload(bytes: &[u8]) -> String {
    let text = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => {
            debug!("clipboard payload BOM: {}", encoding.name());
            let (decoded, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
            decoded.into_owned()
        }
        None => match std::str::from_utf8(bytes) {
            Ok(s) => s.to_string(),
            Err(_) => {
                debug!("clipboard payload is not UTF-8, decoding as Windows-1252");
                let (decoded, _, _) = WINDOWS_1252.decode(bytes);
                decoded.into_owned()
            }
        },
    };
    text.trim_end_matches('\0').to_string()
}

/// Decode and parse a clipboard payload in one step.
pub fn parse_payload(bytes: &[u8]) -> Result<XmlDocument, IoError> {
    XmlDocument::parse(&decode_payload(bytes))
}
