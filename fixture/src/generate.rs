//! The generation pipeline: sample, encode, write.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{FixtureError, FixtureResult, IoAction};
use crate::layout::{write_party, PartyStats};
use crate::sampler::Sampler;
use crate::scenario::ScenarioConfig;

/// One party file produced by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenParty {
    pub party: usize,
    pub path: PathBuf,
    pub stats: PartyStats,
}

/// Everything a successful run wrote, party 0 first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationReport {
    pub parties: Vec<WrittenParty>,
}

impl GenerationReport {
    /// Total values drawn across all parties.
    #[must_use]
    pub fn total_values(&self) -> u64 {
        self.parties.iter().map(|party| party.stats.values).sum()
    }
}

/// Writes every party file for `config`.
///
/// The output directory is created if missing and each file is truncated
/// before writing. One sampler, seeded from the config, feeds all parties in
/// order, so the same config always yields byte-identical files. The first
/// I/O failure aborts the run; a file being written at that point is left
/// truncated.
pub fn generate(config: &ScenarioConfig) -> FixtureResult<GenerationReport> {
    let dir = config.dir();
    fs::create_dir_all(dir).map_err(|err| FixtureError::io(IoAction::CreateDir, dir, err))?;

    let range = config.range();
    let mut sampler = Sampler::new(config.sampler_seed(), range);
    debug!(
        scenario = %config.kind(),
        seed = config.seed(),
        bits = config.bits().get(),
        %range,
        "seeded sampler"
    );

    let layouts = config.shape().layouts();
    let mut report = GenerationReport::default();
    for (layout, path) in layouts.iter().zip(config.party_paths()) {
        let file =
            File::create(&path).map_err(|err| FixtureError::io(IoAction::CreateFile, &path, err))?;
        let mut sink = BufWriter::new(file);
        let stats = write_party(&mut sink, layout, &mut sampler)
            .map_err(|err| FixtureError::io(IoAction::Write, &path, err))?;
        debug!(
            party = layout.party,
            path = %path.display(),
            rows = stats.rows,
            values = stats.values,
            bytes = stats.bytes,
            "wrote party file"
        );
        report.parties.push(WrittenParty {
            party: layout.party,
            path,
            stats,
        });
    }

    info!(
        scenario = %config.kind(),
        parties = report.parties.len(),
        values = report.total_values(),
        "fixture generation complete"
    );
    Ok(report)
}

/// Encodes every party file into memory, using the same draw order as
/// [`generate`].
pub fn encode_parties(config: &ScenarioConfig) -> io::Result<Vec<Vec<u8>>> {
    let mut sampler = Sampler::new(config.sampler_seed(), config.range());
    config
        .shape()
        .layouts()
        .iter()
        .map(|layout| {
            let mut out = Vec::new();
            write_party(&mut out, layout, &mut sampler)?;
            Ok(out)
        })
        .collect()
}
