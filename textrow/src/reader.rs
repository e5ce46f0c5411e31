//! Parser for decimal row text.

use crate::error::{TextError, TextResult};

/// Rows parsed back from decimal row text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedRows {
    /// Values per line, in file order.
    pub rows: Vec<Vec<i64>>,
    /// Whether the input ended with `\n`.
    pub trailing_newline: bool,
}

impl ParsedRows {
    /// Returns the number of values on each row.
    #[must_use]
    pub fn row_widths(&self) -> Vec<usize> {
        self.rows.iter().map(Vec::len).collect()
    }

    /// Returns the common row width if every row has the same number of values.
    #[must_use]
    pub fn uniform_width(&self) -> Option<usize> {
        let first = self.rows.first()?.len();
        self.rows
            .iter()
            .all(|row| row.len() == first)
            .then_some(first)
    }

    /// Iterates over all values in row-major order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Returns the total number of values.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Returns the smallest and largest value, or `None` when there are no values.
    #[must_use]
    pub fn min_max(&self) -> Option<(i64, i64)> {
        self.values().fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
        })
    }
}

/// Parses decimal row text into rows of integers.
///
/// Lines are split on `\n`; a final `\n` does not open an extra row. Tokens
/// on a line are split on ASCII whitespace.
pub fn parse_rows(bytes: &[u8]) -> TextResult<ParsedRows> {
    let text = std::str::from_utf8(bytes).map_err(|err| TextError::InvalidUtf8 {
        offset: err.valid_up_to(),
    })?;
    let trailing_newline = text.ends_with('\n');
    let body = text.strip_suffix('\n').unwrap_or(text);

    let mut rows = Vec::new();
    if text.is_empty() {
        return Ok(ParsedRows {
            rows,
            trailing_newline,
        });
    }
    for (idx, line) in body.split('\n').enumerate() {
        let row = line
            .split_ascii_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| TextError::InvalidInteger {
                    line: idx + 1,
                    token: token.to_string(),
                })
            })
            .collect::<TextResult<Vec<_>>>()?;
        rows.push(row);
    }
    Ok(ParsedRows {
        rows,
        trailing_newline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input() {
        let parsed = parse_rows(b"").unwrap();
        assert!(parsed.rows.is_empty());
        assert!(!parsed.trailing_newline);
        assert_eq!(parsed.min_max(), None);
        assert_eq!(parsed.uniform_width(), None);
    }

    #[test]
    fn single_column() {
        let parsed = parse_rows(b"5\n-2\n9\n").unwrap();
        assert_eq!(parsed.rows, vec![vec![5], vec![-2], vec![9]]);
        assert_eq!(parsed.uniform_width(), Some(1));
        assert_eq!(parsed.min_max(), Some((-2, 9)));
    }

    #[test]
    fn missing_trailing_newline_is_reported() {
        let parsed = parse_rows(b"1 2\n3 4").unwrap();
        assert_eq!(parsed.rows, vec![vec![1, 2], vec![3, 4]]);
        assert!(!parsed.trailing_newline);
    }

    #[test]
    fn ragged_rows() {
        let parsed = parse_rows(b"1 2 3\n4\n").unwrap();
        assert_eq!(parsed.row_widths(), vec![3, 1]);
        assert_eq!(parsed.uniform_width(), None);
        assert_eq!(parsed.value_count(), 4);
    }

    #[test]
    fn blank_line_is_an_empty_row() {
        let parsed = parse_rows(b"1\n\n2\n").unwrap();
        assert_eq!(parsed.rows, vec![vec![1], vec![], vec![2]]);
    }

    #[test]
    fn extra_whitespace_is_tolerated() {
        let parsed = parse_rows(b"  7\t8  \r\n").unwrap();
        assert_eq!(parsed.rows, vec![vec![7, 8]]);
    }

    #[test]
    fn rejects_non_integer_token() {
        let err = parse_rows(b"1 2\n3 x4\n").unwrap_err();
        assert_eq!(
            err,
            TextError::InvalidInteger {
                line: 2,
                token: "x4".to_string(),
            }
        );
    }

    #[test]
    fn rejects_invalid_utf8() {
        let err = parse_rows(b"12 \xff\n").unwrap_err();
        assert_eq!(err, TextError::InvalidUtf8 { offset: 3 });
    }
}
