// XML Spreadsheet IO: document tree and clipboard payloads

pub mod clipboard;
pub mod error;
pub mod tree;

pub use clipboard::{decode_payload, find_xml_format, parse_payload, ClipboardFormat, XML_SPREADSHEET_FORMAT};
pub use error::IoError;
pub use tree::{XmlDocument, XmlElement, XmlNode};
