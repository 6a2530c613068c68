use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// TOML parse / serialization error.
    Parse(String),
    /// Settings parsed but make no sense (zero-sized grid, ...).
    Validation(String),
    /// IO error (directory creation, file write).
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "settings parse error: {msg}"),
            Self::Validation(msg) => write!(f, "invalid settings: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
