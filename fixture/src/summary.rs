//! Post-write summary.
//!
//! Collecting a summary never fails: a file whose size cannot be read is
//! reported without one, and the files already written are left alone.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::generate::GenerationReport;
use crate::range::{BitWidth, ValueRange};
use crate::scenario::{ScenarioConfig, Shape};

/// Size and contents of one written party file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PartySummary {
    pub party: usize,
    pub path: PathBuf,
    pub rows: u64,
    pub values: u64,
    /// `None` when the file could not be stat'ed after writing.
    pub size_bytes: Option<u64>,
}

/// What a run produced, for humans and for `summary.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Summary {
    pub shape: Shape,
    pub seed: i64,
    pub bits: BitWidth,
    pub signed: bool,
    pub range: ValueRange,
    pub conv_output: Option<(usize, usize)>,
    pub parties: Vec<PartySummary>,
}

impl Summary {
    /// Builds a summary, reading each file's size from the filesystem.
    pub fn collect(config: &ScenarioConfig, report: &GenerationReport) -> Self {
        let parties = report
            .parties
            .iter()
            .map(|written| {
                let size_bytes = match fs::metadata(&written.path) {
                    Ok(meta) => Some(meta.len()),
                    Err(err) => {
                        warn!(path = %written.path.display(), error = %err, "skipping file size");
                        None
                    }
                };
                PartySummary {
                    party: written.party,
                    path: written.path.clone(),
                    rows: written.stats.rows,
                    values: written.stats.values,
                    size_bytes,
                }
            })
            .collect();
        Self {
            shape: *config.shape(),
            seed: config.seed(),
            bits: config.bits(),
            signed: config.signed(),
            range: config.range(),
            conv_output: config.shape().conv_output(),
            parties,
        }
    }

    /// Human-readable report lines. Parties without a known size are left out.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .parties
            .iter()
            .filter_map(|party| {
                party.size_bytes.map(|size| {
                    format!(
                        "✔ Wrote Party{}: {}  ({} bytes)",
                        party.party,
                        party.path.display(),
                        format_thousands(size)
                    )
                })
            })
            .collect();
        let shape_line = match self.shape {
            Shape::Ltz { .. } => format!("   {}; value range: {}", self.shape, self.range),
            _ => format!("   Shapes: {}; value range: {}", self.shape, self.range),
        };
        lines.push(shape_line);
        lines
    }
}

/// Formats `value` with `,` between groups of three digits.
#[must_use]
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
