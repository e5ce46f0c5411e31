//! Scenario parameters and their validation.
//!
//! [`ScenarioParams`] holds raw, caller-supplied values. [`ScenarioParams::validate`]
//! is the only way to obtain a [`ScenarioConfig`], and it performs no I/O, so
//! an invalid configuration can never leave files behind.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::error::ParamError;
use crate::layout::{Block, PartyLayout};
use crate::range::{BitWidth, ValueRange};

/// Default output directory.
pub const DEFAULT_DIR: &str = "Player-Data";
/// Default party-0 file name.
pub const DEFAULT_P0_FILE: &str = "Input-P0-0";
/// Default party-1 file name.
pub const DEFAULT_P1_FILE: &str = "Input-P1-0";
/// Default seed.
pub const DEFAULT_SEED: i64 = 42;
/// Default bit width.
pub const DEFAULT_BITS: i64 = 16;

/// The computation a fixture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScenarioKind {
    /// Vectorized less-than-zero test over party 0's values.
    Ltz,
    /// Single valid 2D convolution of party 0's matrix by party 1's kernel.
    Conv,
    /// Linear layer `y = W x + b`, `x` from party 0, `W` and `b` from party 1.
    Linear,
}

impl ScenarioKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ltz => "ltz",
            Self::Conv => "conv",
            Self::Linear => "linear",
        }
    }

    /// Number of parties that receive an input file.
    #[must_use]
    pub const fn party_count(self) -> usize {
        match self {
            Self::Ltz => 1,
            Self::Conv | Self::Linear => 2,
        }
    }

    /// Signedness used when the caller does not pick one.
    ///
    /// The sign test needs negative values; the arithmetic scenarios default
    /// to non-negative operands.
    #[must_use]
    pub const fn default_signed(self) -> bool {
        matches!(self, Self::Ltz)
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unvalidated shape dimensions, as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawShape {
    Ltz { len: i64 },
    Conv { a_rows: i64, a_cols: i64, w_dim: i64 },
    Linear { n: i64 },
}

impl RawShape {
    #[must_use]
    pub const fn kind(&self) -> ScenarioKind {
        match self {
            Self::Ltz { .. } => ScenarioKind::Ltz,
            Self::Conv { .. } => ScenarioKind::Conv,
            Self::Linear { .. } => ScenarioKind::Linear,
        }
    }

    fn validate(self) -> Result<Shape, ParamError> {
        match self {
            Self::Ltz { len } => Ok(Shape::Ltz {
                len: dimension("LEN", len)?,
            }),
            Self::Conv {
                a_rows,
                a_cols,
                w_dim,
            } => {
                let a_rows = dimension("A_ROWS", a_rows)?;
                let a_cols = dimension("A_COLS", a_cols)?;
                let w_dim = dimension("W_DIM", w_dim)?;
                if w_dim > a_rows || w_dim > a_cols {
                    return Err(ParamError::KernelExceedsInput {
                        w_dim,
                        a_rows,
                        a_cols,
                    });
                }
                Ok(Shape::Conv {
                    a_rows,
                    a_cols,
                    w_dim,
                })
            }
            Self::Linear { n } => Ok(Shape::Linear {
                n: dimension("n", n)?,
            }),
        }
    }
}

fn dimension(name: &'static str, value: i64) -> Result<usize, ParamError> {
    if value <= 0 {
        return Err(ParamError::NonPositiveDimension { name, value });
    }
    usize::try_from(value).map_err(|_| ParamError::DimensionTooLarge { name, value })
}

/// Validated shape dimensions. All dimensions are positive and the
/// convolution kernel fits inside its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "scenario", rename_all = "snake_case"))]
pub enum Shape {
    Ltz {
        len: usize,
    },
    Conv {
        a_rows: usize,
        a_cols: usize,
        w_dim: usize,
    },
    Linear {
        n: usize,
    },
}

impl Shape {
    #[must_use]
    pub const fn kind(&self) -> ScenarioKind {
        match self {
            Self::Ltz { .. } => ScenarioKind::Ltz,
            Self::Conv { .. } => ScenarioKind::Conv,
            Self::Linear { .. } => ScenarioKind::Linear,
        }
    }

    /// Output size of the valid convolution, `(rows, cols)`.
    #[must_use]
    pub const fn conv_output(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Conv {
                a_rows,
                a_cols,
                w_dim,
            } => Some((a_rows - w_dim + 1, a_cols - w_dim + 1)),
            _ => None,
        }
    }

    /// File layout per party, in draw order.
    #[must_use]
    pub fn layouts(&self) -> Vec<PartyLayout> {
        match *self {
            Self::Ltz { len } => vec![PartyLayout::new(0, vec![Block::new(len, 1)])],
            Self::Conv {
                a_rows,
                a_cols,
                w_dim,
            } => vec![
                PartyLayout::new(0, vec![Block::new(a_rows, a_cols)]),
                PartyLayout::new(1, vec![Block::new(w_dim, w_dim)]),
            ],
            Self::Linear { n } => vec![
                PartyLayout::new(0, vec![Block::new(1, n)]),
                PartyLayout::new(1, vec![Block::new(n, n), Block::new(1, n)]),
            ],
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Ltz { len } => write!(f, "LEN={len}"),
            Self::Conv {
                a_rows,
                a_cols,
                w_dim,
            } => {
                let (out_r, out_c) = (a_rows - w_dim + 1, a_cols - w_dim + 1);
                write!(
                    f,
                    "A={a_rows}x{a_cols}, W={w_dim}x{w_dim}, out={out_r}x{out_c}"
                )
            }
            Self::Linear { n } => write!(f, "x={n}, W={n}x{n}, b={n}"),
        }
    }
}

/// Where party files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub dir: PathBuf,
    pub p0_file: String,
    /// Ignored by single-party scenarios.
    pub p1_file: Option<String>,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_DIR),
            p0_file: DEFAULT_P0_FILE.to_string(),
            p1_file: Some(DEFAULT_P1_FILE.to_string()),
        }
    }
}

impl OutputFiles {
    fn validate(&self, kind: ScenarioKind) -> Result<Self, ParamError> {
        let p0_file = file_name(0, &self.p0_file)?;
        if kind.party_count() < 2 {
            return Ok(Self {
                dir: self.dir.clone(),
                p0_file,
                p1_file: None,
            });
        }
        let p1_file = self
            .p1_file
            .as_deref()
            .ok_or(ParamError::MissingOutputFile { party: 1 })?;
        let p1_file = file_name(1, p1_file)?;
        if p1_file == p0_file {
            return Err(ParamError::DuplicateOutputPath { file: p1_file });
        }
        Ok(Self {
            dir: self.dir.clone(),
            p0_file,
            p1_file: Some(p1_file),
        })
    }
}

/// Reduces `raw` to the single plain file name it denotes inside the output
/// directory. `./Input` and `Input/.` both become `Input`; anything with a
/// root, a `..`, or more than one name component is rejected.
fn file_name(party: usize, raw: &str) -> Result<String, ParamError> {
    if raw.is_empty() {
        return Err(ParamError::EmptyFileName { party });
    }
    let invalid = || ParamError::InvalidFileName {
        party,
        file: raw.to_string(),
    };
    let mut name = None;
    for component in Path::new(raw).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(part) if name.is_none() => name = Some(part),
            _ => return Err(invalid()),
        }
    }
    name.map(|part| part.to_string_lossy().into_owned()).ok_or_else(invalid)
}

/// Raw parameters for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioParams {
    pub shape: RawShape,
    pub bits: i64,
    /// `None` selects [`ScenarioKind::default_signed`].
    pub signed: Option<bool>,
    /// Any integer; negative seeds are as valid as positive ones.
    pub seed: i64,
    pub output: OutputFiles,
}

impl ScenarioParams {
    /// Parameters with the stock defaults for the given shape.
    #[must_use]
    pub fn new(shape: RawShape) -> Self {
        Self {
            shape,
            bits: DEFAULT_BITS,
            signed: None,
            seed: DEFAULT_SEED,
            output: OutputFiles::default(),
        }
    }

    /// Checks every parameter and produces an immutable config.
    ///
    /// Order: bit width, dimensions, kernel fit, output names. The first
    /// failure is returned.
    pub fn validate(&self) -> Result<ScenarioConfig, ParamError> {
        let bits = BitWidth::new(self.bits)?;
        let shape = self.shape.validate()?;
        let kind = shape.kind();
        let output = self.output.validate(kind)?;
        Ok(ScenarioConfig {
            shape,
            bits,
            signed: self.signed.unwrap_or_else(|| kind.default_signed()),
            seed: self.seed,
            output,
        })
    }
}

/// A validated, immutable generation config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    shape: Shape,
    bits: BitWidth,
    signed: bool,
    seed: i64,
    output: OutputFiles,
}

impl ScenarioConfig {
    #[must_use]
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub const fn kind(&self) -> ScenarioKind {
        self.shape.kind()
    }

    #[must_use]
    pub const fn bits(&self) -> BitWidth {
        self.bits
    }

    #[must_use]
    pub const fn signed(&self) -> bool {
        self.signed
    }

    #[must_use]
    pub const fn seed(&self) -> i64 {
        self.seed
    }

    /// Generator seed: the two's-complement bits of [`seed`](Self::seed).
    #[must_use]
    pub const fn sampler_seed(&self) -> u64 {
        self.seed as u64
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.output.dir
    }

    #[must_use]
    pub const fn range(&self) -> ValueRange {
        ValueRange::derive(self.bits, self.signed)
    }

    /// Output path per party, party 0 first.
    #[must_use]
    pub fn party_paths(&self) -> Vec<PathBuf> {
        std::iter::once(&self.output.p0_file)
            .chain(self.output.p1_file.as_ref())
            .map(|file| self.output.dir.join(file))
            .collect()
    }
}
