//! Streaming writer for decimal rows.

use std::fmt::Write as _;
use std::io::{self, Write};

use crate::{ROW_TERMINATOR, VALUE_SEPARATOR};

/// Writes rows of integers as space-separated decimal text.
///
/// Every row ends with exactly one `\n`; there is no leading or trailing
/// separator. Call [`finish`](Self::finish) to flush and recover the sink.
#[derive(Debug)]
pub struct RowWriter<W: Write> {
    inner: W,
    /// Reused formatting buffer for a single value.
    scratch: String,
    bytes_written: u64,
    rows_written: u64,
    values_written: u64,
}

impl<W: Write> RowWriter<W> {
    /// Creates a writer over `inner`.
    #[must_use]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            scratch: String::with_capacity(12),
            bytes_written: 0,
            rows_written: 0,
            values_written: 0,
        }
    }

    /// Returns the number of bytes handed to the sink so far.
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns the number of complete rows written so far.
    #[must_use]
    pub const fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Returns the number of values written so far.
    #[must_use]
    pub const fn values_written(&self) -> u64 {
        self.values_written
    }

    /// Writes one row and its terminator, returning the number of values on it.
    ///
    /// Values are pulled from `values` lazily, so a sampler can be fed in
    /// directly without collecting the row first.
    pub fn write_row<I>(&mut self, values: I) -> io::Result<usize>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut count = 0usize;
        for value in values {
            if count > 0 {
                self.write_bytes(&[VALUE_SEPARATOR])?;
            }
            self.write_value(value)?;
            count += 1;
        }
        self.write_bytes(&[ROW_TERMINATOR])?;
        self.rows_written += 1;
        self.values_written += count as u64;
        Ok(count)
    }

    /// Flushes the sink and returns it.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }

    fn write_value(&mut self, value: i64) -> io::Result<()> {
        self.scratch.clear();
        // Formatting into a String cannot fail.
        let _ = write!(self.scratch, "{value}");
        self.inner.write_all(self.scratch.as_bytes())?;
        self.bytes_written += self.scratch.len() as u64;
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}
