//! Error types for row text parsing.

use std::fmt;

/// Result type for row text operations.
pub type TextResult<T> = Result<T, TextError>;

/// Errors that can occur while reading decimal row text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Input is not valid UTF-8.
    InvalidUtf8 {
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// A token on a row is not a decimal integer.
    InvalidInteger {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 { offset } => {
                write!(f, "input is not valid UTF-8 at byte offset {offset}")
            }
            Self::InvalidInteger { line, token } => {
                write!(f, "line {line}: token {token:?} is not a decimal integer")
            }
        }
    }
}

impl std::error::Error for TextError {}
