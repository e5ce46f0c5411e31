//! Inspection and reporting helpers for MPC fixture files.
//!
//! This crate backs the `mpcfix` binary:
//!
//! - Inspect a party file's row structure and value bounds
//! - Render generation summaries for the terminal
//!
//! # Design Principles
//!
//! - **Read-only** - Inspection never touches the files it reads.
//! - **Human-readable output** - Make it easy to see what the consumer will parse.

use fixture::{Summary, ValueRange};
use serde::Serialize;
use textrow::{parse_rows, TextResult};

/// Row widths of a party file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowShape {
    /// File has no rows.
    Empty,
    /// Every row has this many values.
    Uniform(usize),
    /// Row widths differ; listed in file order.
    Ragged(Vec<usize>),
}

/// What a party file contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub byte_len: usize,
    pub rows: usize,
    pub shape: RowShape,
    pub values: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub trailing_newline: bool,
    /// Range checked against, if one was requested.
    pub expected_range: Option<ValueRange>,
    /// Values outside `expected_range`.
    pub out_of_range: usize,
}

/// Parses a party file and summarizes its structure.
pub fn inspect_party_bytes(
    bytes: &[u8],
    expected_range: Option<ValueRange>,
) -> TextResult<InspectReport> {
    let parsed = parse_rows(bytes)?;
    let shape = if parsed.rows.is_empty() {
        RowShape::Empty
    } else {
        parsed
            .uniform_width()
            .map_or_else(|| RowShape::Ragged(parsed.row_widths()), RowShape::Uniform)
    };
    let (min, max) = parsed
        .min_max()
        .map_or((None, None), |(lo, hi)| (Some(lo), Some(hi)));
    let out_of_range = expected_range.map_or(0, |range| {
        parsed.values().filter(|value| !range.contains(*value)).count()
    });
    Ok(InspectReport {
        byte_len: bytes.len(),
        rows: parsed.rows.len(),
        shape,
        values: parsed.value_count(),
        min,
        max,
        trailing_newline: parsed.trailing_newline,
        expected_range,
        out_of_range,
    })
}

/// Multi-line terminal rendering of an [`InspectReport`].
#[must_use]
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "bytes: {} rows: {} values: {}",
        fixture::format_thousands(report.byte_len as u64),
        report.rows,
        report.values
    ));
    let shape = match &report.shape {
        RowShape::Empty => "empty".to_string(),
        RowShape::Uniform(width) => format!("{} x {width}", report.rows),
        RowShape::Ragged(widths) => {
            let widths: Vec<String> = widths.iter().map(ToString::to_string).collect();
            format!("ragged [{}]", widths.join(", "))
        }
    };
    lines.push(format!("shape: {shape}"));
    if let (Some(min), Some(max)) = (report.min, report.max) {
        lines.push(format!("min: {min} max: {max}"));
    }
    if !report.trailing_newline && report.rows > 0 {
        lines.push("warning: last row is not newline-terminated".to_string());
    }
    if let Some(range) = report.expected_range {
        lines.push(format!(
            "range {range}: {} values out of range",
            report.out_of_range
        ));
    }
    lines.join("\n")
}

/// Summary lines as printed after a generation run.
#[must_use]
pub fn format_summary_pretty(summary: &Summary) -> String {
    summary.lines().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fixture::BitWidth;

    fn range(bits: i64, signed: bool) -> ValueRange {
        ValueRange::derive(BitWidth::new(bits).unwrap(), signed)
    }

    #[test]
    fn inspect_uniform_matrix() {
        let report = inspect_party_bytes(b"1 2 3\n4 5 6\n", Some(range(4, false))).unwrap();
        assert_eq!(report.rows, 2);
        assert_eq!(report.shape, RowShape::Uniform(3));
        assert_eq!(report.values, 6);
        assert_eq!((report.min, report.max), (Some(1), Some(6)));
        assert_eq!(report.out_of_range, 0);
    }

    #[test]
    fn inspect_counts_out_of_range() {
        let report = inspect_party_bytes(b"-1\n16\n3\n", Some(range(4, false))).unwrap();
        assert_eq!(report.out_of_range, 2);
    }

    #[test]
    fn inspect_ragged_and_unterminated() {
        let report = inspect_party_bytes(b"1 2\n3", None).unwrap();
        assert_eq!(report.shape, RowShape::Ragged(vec![2, 1]));
        assert!(!report.trailing_newline);
        let pretty = format_inspect_pretty(&report);
        assert!(pretty.contains("ragged [2, 1]"));
        assert!(pretty.contains("not newline-terminated"));
    }

    #[test]
    fn inspect_empty_file() {
        let report = inspect_party_bytes(b"", None).unwrap();
        assert_eq!(report.shape, RowShape::Empty);
        assert_eq!(report.min, None);
        assert_eq!(format_inspect_pretty(&report), "bytes: 0 rows: 0 values: 0\nshape: empty");
    }

    #[test]
    fn inspect_rejects_garbage() {
        assert!(inspect_party_bytes(b"1 two\n", None).is_err());
    }

    #[test]
    fn pretty_includes_range_check() {
        let report = inspect_party_bytes(b"0 15\n", Some(range(4, false))).unwrap();
        let pretty = format_inspect_pretty(&report);
        assert!(pretty.contains("shape: 1 x 2"));
        assert!(pretty.contains("range [0, 15]: 0 values out of range"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = inspect_party_bytes(b"7\n", None).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"], 1);
        assert_eq!(json["shape"]["uniform"], 1);
        assert_eq!(json["expected_range"], serde_json::Value::Null);
    }
}
