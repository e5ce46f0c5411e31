//! Bit widths and the value ranges derived from them.

use std::fmt;

use crate::error::ParamError;

/// A validated bit width in `1..=31`.
///
/// The upper bound keeps every derived value inside the signed 32-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BitWidth(u32);

impl BitWidth {
    /// Smallest accepted bit width.
    pub const MIN: u32 = 1;
    /// Largest accepted bit width.
    pub const MAX: u32 = 31;

    /// Validates a raw bit width.
    pub fn new(bits: i64) -> Result<Self, ParamError> {
        if bits < i64::from(Self::MIN) || bits > i64::from(Self::MAX) {
            return Err(ParamError::InvalidBitWidth {
                bits,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(bits as u32))
    }

    /// Returns the raw bit count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed interval `[lo, hi]` that every sampled value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueRange {
    pub lo: i64,
    pub hi: i64,
}

impl ValueRange {
    /// Derives the range for a bit width and signedness.
    ///
    /// Signed: `[-2^(bits-1), 2^(bits-1) - 1]`. Unsigned: `[0, 2^bits - 1]`.
    #[must_use]
    pub const fn derive(bits: BitWidth, signed: bool) -> Self {
        let bits = bits.get();
        if signed {
            let half = 1i64 << (bits - 1);
            Self {
                lo: -half,
                hi: half - 1,
            }
        } else {
            Self {
                lo: 0,
                hi: (1i64 << bits) - 1,
            }
        }
    }

    /// Number of distinct values in the range.
    #[must_use]
    pub const fn span(&self) -> u64 {
        (self.hi - self.lo) as u64 + 1
    }

    /// Returns `true` if `value` lies in the range.
    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(value: i64) -> BitWidth {
        BitWidth::new(value).unwrap()
    }

    #[test]
    fn bit_width_bounds() {
        assert!(BitWidth::new(1).is_ok());
        assert!(BitWidth::new(31).is_ok());
        assert_eq!(
            BitWidth::new(0),
            Err(ParamError::InvalidBitWidth {
                bits: 0,
                min: 1,
                max: 31
            })
        );
        assert!(BitWidth::new(32).is_err());
        assert!(BitWidth::new(-3).is_err());
        assert!(BitWidth::new(i64::MAX).is_err());
    }

    #[test]
    fn unsigned_ranges() {
        assert_eq!(ValueRange::derive(bits(1), false), ValueRange { lo: 0, hi: 1 });
        assert_eq!(ValueRange::derive(bits(4), false), ValueRange { lo: 0, hi: 15 });
        assert_eq!(
            ValueRange::derive(bits(16), false),
            ValueRange { lo: 0, hi: 65_535 }
        );
        assert_eq!(
            ValueRange::derive(bits(31), false),
            ValueRange {
                lo: 0,
                hi: i64::from(i32::MAX)
            }
        );
    }

    #[test]
    fn signed_ranges() {
        assert_eq!(ValueRange::derive(bits(1), true), ValueRange { lo: -1, hi: 0 });
        assert_eq!(ValueRange::derive(bits(4), true), ValueRange { lo: -8, hi: 7 });
        assert_eq!(
            ValueRange::derive(bits(16), true),
            ValueRange {
                lo: -32_768,
                hi: 32_767
            }
        );
        assert_eq!(
            ValueRange::derive(bits(31), true),
            ValueRange {
                lo: -(1 << 30),
                hi: (1 << 30) - 1
            }
        );
    }

    #[test]
    fn every_width_fits_i32() {
        for raw in 1..=31 {
            for signed in [false, true] {
                let range = ValueRange::derive(bits(raw), signed);
                assert!(range.lo <= range.hi);
                assert!(range.lo >= i64::from(i32::MIN));
                assert!(range.hi <= i64::from(i32::MAX));
            }
        }
    }

    #[test]
    fn span_and_contains() {
        let range = ValueRange::derive(bits(4), true);
        assert_eq!(range.span(), 16);
        assert!(range.contains(-8));
        assert!(range.contains(7));
        assert!(!range.contains(8));
        assert!(!range.contains(-9));
        assert_eq!(ValueRange::derive(bits(31), false).span(), 1 << 31);
    }

    #[test]
    fn display_format() {
        assert_eq!(ValueRange::derive(bits(4), false).to_string(), "[0, 15]");
        assert_eq!(ValueRange::derive(bits(8), true).to_string(), "[-128, 127]");
        assert_eq!(bits(12).to_string(), "12");
    }
}
