use std::fmt;

/// Fatal decode failures. Any of these aborts the remaining walk; callbacks
/// already delivered to the sink are not retracted.
#[derive(Debug, Clone, PartialEq)]
pub enum PasteError {
    /// An explicit `ss:Index` is present but is not a positive integer.
    InvalidIndex { tag: String, value: String },
    /// A `DateTime` cell whose text does not match `yyyy-MM-dd'T'HH:mm:ss.SSS`.
    InvalidDate { value: String },
    /// A count attribute (expanded extent or merge span) that is not a
    /// non-negative integer.
    InvalidCount { attribute: String, value: String },
    /// A date that cannot be placed on the timeline in the requested zone
    /// (e.g. a local time skipped by a DST transition).
    UnmappableDate { value: String },
}

impl fmt::Display for PasteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { tag, value } => {
                write!(f, "<{tag}>: invalid ss:Index '{value}'")
            }
            Self::InvalidDate { value } => {
                write!(f, "cannot parse date '{value}' (expected yyyy-MM-ddTHH:mm:ss.SSS)")
            }
            Self::InvalidCount { attribute, value } => {
                write!(f, "invalid {attribute} '{value}'")
            }
            Self::UnmappableDate { value } => {
                write!(f, "date '{value}' does not exist in the local time zone")
            }
        }
    }
}

impl std::error::Error for PasteError {}

impl PasteError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidCount { .. } => "invalid_count",
            Self::UnmappableDate { .. } => "unmappable_date",
        }
    }
}
