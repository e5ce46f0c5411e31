//! Decimal row text primitives for MPC fixture files.
//!
//! This crate provides [`RowWriter`] and [`parse_rows`] for the plain-text
//! layout MPC runtimes read party inputs from: whitespace-separated decimal
//! integers, one row per line, every line terminated by `\n`.
//!
//! # Design Principles
//!
//! - **No domain knowledge** - This crate knows nothing about scenarios, parties, or ranges.
//! - **Streaming writes** - Rows go straight to any [`std::io::Write`], nothing is buffered per file.
//! - **Explicit errors** - Malformed input returns structured errors, never panics.
//!
//! # Example
//!
//! ```
//! use textrow::{parse_rows, RowWriter};
//!
//! let mut writer = RowWriter::new(Vec::new());
//! writer.write_row([3, -1, 7]).unwrap();
//! writer.write_row([0]).unwrap();
//! let bytes = writer.finish().unwrap();
//! assert_eq!(bytes, b"3 -1 7\n0\n");
//!
//! let parsed = parse_rows(&bytes).unwrap();
//! assert_eq!(parsed.rows, vec![vec![3, -1, 7], vec![0]]);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{TextError, TextResult};
pub use reader::{parse_rows, ParsedRows};
pub use writer::RowWriter;

/// Separator between values on one row.
pub const VALUE_SEPARATOR: u8 = b' ';

/// Row terminator.
pub const ROW_TERMINATOR: u8 = b'\n';
