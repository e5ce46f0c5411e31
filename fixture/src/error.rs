//! Error types for fixture generation.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Result type for fixture generation.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Out-of-contract scenario parameters, detected before any sampling or I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    /// Bit width outside the supported range.
    InvalidBitWidth {
        /// The rejected bit width.
        bits: i64,
        /// Smallest accepted bit width.
        min: u32,
        /// Largest accepted bit width.
        max: u32,
    },

    /// A shape dimension is zero or negative.
    NonPositiveDimension { name: &'static str, value: i64 },

    /// A shape dimension does not fit the platform's `usize`.
    DimensionTooLarge { name: &'static str, value: i64 },

    /// Convolution kernel is larger than the input it slides over.
    KernelExceedsInput {
        w_dim: usize,
        a_rows: usize,
        a_cols: usize,
    },

    /// A two-party scenario was given no file name for party 1.
    MissingOutputFile { party: usize },

    /// An output file name is empty.
    EmptyFileName { party: usize },

    /// An output file name is not a single plain name inside the output directory.
    InvalidFileName { party: usize, file: String },

    /// Two parties would write to the same file.
    DuplicateOutputPath { file: String },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBitWidth { bits, min, max } => write!(
                f,
                "bits must be between {min} and {max} for practical decimal I/O sizes (got {bits})"
            ),
            Self::NonPositiveDimension { name, value } => {
                write!(f, "{name} must be positive (got {value})")
            }
            Self::DimensionTooLarge { name, value } => {
                write!(f, "{name}={value} does not fit in memory addressing on this platform")
            }
            Self::KernelExceedsInput {
                w_dim,
                a_rows,
                a_cols,
            } => write!(
                f,
                "W_DIM={w_dim} must be <= A_ROWS={a_rows} and <= A_COLS={a_cols} (valid conv)"
            ),
            Self::MissingOutputFile { party } => {
                write!(f, "no output file name given for party {party}")
            }
            Self::EmptyFileName { party } => {
                write!(f, "output file name for party {party} is empty")
            }
            Self::InvalidFileName { party, file } => write!(
                f,
                "output file name {file:?} for party {party} must be a plain name inside the output directory"
            ),
            Self::DuplicateOutputPath { file } => {
                write!(f, "party 0 and party 1 would both write to {file:?}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Filesystem step that failed during generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoAction {
    CreateDir,
    CreateFile,
    Write,
}

impl fmt::Display for IoAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CreateDir => "create directory",
            Self::CreateFile => "create file",
            Self::Write => "write",
        };
        f.write_str(label)
    }
}

/// Errors that abort a generation run.
#[derive(Debug)]
pub enum FixtureError {
    /// Parameters failed validation; nothing was written.
    InvalidParameter(ParamError),

    /// Directory creation or file write failed.
    ///
    /// A file that was being written is left truncated and must be treated
    /// as invalid.
    Io {
        action: IoAction,
        path: PathBuf,
        source: io::Error,
    },
}

impl FixtureError {
    pub(crate) fn io(action: IoAction, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(err) => write!(f, "invalid parameter: {err}"),
            Self::Io {
                action,
                path,
                source,
            } => write!(f, "failed to {action} {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParameter(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<ParamError> for FixtureError {
    fn from(err: ParamError) -> Self {
        Self::InvalidParameter(err)
    }
}
