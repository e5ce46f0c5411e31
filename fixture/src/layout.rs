//! Party file layouts and the row encoder that fills them.

use std::io::{self, Write};

use textrow::RowWriter;

use crate::sampler::Sampler;

/// A `rows x cols` run of lines in a party file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub rows: usize,
    pub cols: usize,
}

impl Block {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    #[must_use]
    pub const fn value_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }
}

/// Ordered blocks making up one party's file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyLayout {
    pub party: usize,
    pub blocks: Vec<Block>,
}

impl PartyLayout {
    #[must_use]
    pub const fn new(party: usize, blocks: Vec<Block>) -> Self {
        Self { party, blocks }
    }

    /// Total values in the file.
    #[must_use]
    pub fn value_count(&self) -> u64 {
        self.blocks.iter().map(Block::value_count).sum()
    }
}

/// Counters for one encoded party file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartyStats {
    pub rows: u64,
    pub values: u64,
    pub bytes: u64,
}

/// Encodes one party's file, drawing values row-major from `sampler`.
///
/// The sink is flushed before returning.
pub fn write_party<W: Write>(
    sink: &mut W,
    layout: &PartyLayout,
    sampler: &mut Sampler,
) -> io::Result<PartyStats> {
    let mut writer = RowWriter::new(sink);
    for block in &layout.blocks {
        for _ in 0..block.rows {
            writer.write_row(sampler.by_ref().take(block.cols))?;
        }
    }
    let stats = PartyStats {
        rows: writer.rows_written(),
        values: writer.values_written(),
        bytes: writer.bytes_written(),
    };
    writer.finish()?;
    Ok(stats)
}
