//! Crate-level error types.

use std::fmt;

/// Errors produced by the textype crate.
#[derive(Debug)]
pub enum TextypeError {
    /// The animation was configured without any text to type.
    NoTexts,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A render host, scheduler or observer could not be driven.
    Host(String),
}

impl fmt::Display for TextypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTexts => {
                write!(f, "configuration error: no texts to animate")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for TextypeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TextypeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
