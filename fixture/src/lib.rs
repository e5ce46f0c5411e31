//! Deterministic per-party input fixtures for MPC benchmarks.
//!
//! Each scenario (sign test, 2D convolution, linear layer) draws integers
//! from a bit-width-derived range and writes them as decimal text files, one
//! per party, in the layout the MPC runtime reads.
//!
//! A run is a straight pipeline:
//!
//! 1. [`ScenarioParams::validate`] turns raw parameters into a [`ScenarioConfig`] (pure).
//! 2. [`generate`] seeds a [`Sampler`] and streams every party file to disk.
//! 3. [`Summary::collect`] reports sizes, shapes and the value range.
//!
//! # Design Principles
//!
//! - **Reproducible** - Same config, byte-identical files. The sampler is scoped to one run.
//! - **Validate first** - Invalid parameters are rejected before any file is touched.
//! - **Verbatim values** - Every drawn value is written as-is; nothing is clamped.
//!
//! # Example
//!
//! ```
//! use fixture::{encode_parties, RawShape, ScenarioParams};
//!
//! let mut params = ScenarioParams::new(RawShape::Conv { a_rows: 3, a_cols: 3, w_dim: 2 });
//! params.bits = 4;
//! let config = params.validate().unwrap();
//! assert_eq!(config.range().to_string(), "[0, 15]");
//!
//! let files = encode_parties(&config).unwrap();
//! assert_eq!(files.len(), 2);
//! assert_eq!(files[0].iter().filter(|&&b| b == b'\n').count(), 3);
//! assert_eq!(files[1].iter().filter(|&&b| b == b'\n').count(), 2);
//! ```

mod error;
mod generate;
mod layout;
mod range;
mod sampler;
mod scenario;
mod summary;

pub use error::{FixtureError, FixtureResult, IoAction, ParamError};
pub use generate::{encode_parties, generate, GenerationReport, WrittenParty};
pub use layout::{write_party, Block, PartyLayout, PartyStats};
pub use range::{BitWidth, ValueRange};
pub use sampler::Sampler;
pub use scenario::{
    OutputFiles, RawShape, ScenarioConfig, ScenarioKind, ScenarioParams, Shape, DEFAULT_BITS,
    DEFAULT_DIR, DEFAULT_P0_FILE, DEFAULT_P1_FILE, DEFAULT_SEED,
};
pub use summary::{format_thousands, PartySummary, Summary};

/// Validates `params` and writes every party file.
///
/// Validation failures surface as [`FixtureError::InvalidParameter`] before
/// any filesystem access.
pub fn run(params: &ScenarioParams) -> FixtureResult<(ScenarioConfig, GenerationReport)> {
    let config = params.validate()?;
    let report = generate(&config)?;
    Ok((config, report))
}
