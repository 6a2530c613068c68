use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum IoError {
    /// quick-xml reader error, with the byte offset it was raised at.
    Xml { position: u64, message: String },
    /// Closing tag that does not match the open element, or input ending
    /// with elements still open.
    Malformed(String),
    /// No root element at all.
    Empty,
    /// File or stream read error.
    Io(String),
}

impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Xml { position, message } => {
                write!(f, "XML parse error at byte {position}: {message}")
            }
            Self::Malformed(msg) => write!(f, "malformed XML: {msg}"),
            Self::Empty => write!(f, "document has no root element"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for IoError {}

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Io(e.to_string())
    }
}
