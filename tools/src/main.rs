use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use fixture::{
    run, BitWidth, OutputFiles, RawShape, ScenarioParams, Summary, ValueRange, DEFAULT_BITS,
    DEFAULT_DIR, DEFAULT_P0_FILE, DEFAULT_P1_FILE, DEFAULT_SEED,
};
use tools::{format_inspect_pretty, format_summary_pretty, inspect_party_bytes};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mpcfix",
    version,
    about = "Deterministic input fixtures for MPC benchmarks"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign test: LEN integers for party 0, one per line.
    Ltz {
        /// Vector length.
        #[arg(long, default_value_t = 1024, allow_negative_numbers = true)]
        len: i64,
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        sign: SignArgs,
    },
    /// Valid 2D convolution: matrix A for party 0, square kernel W for party 1.
    Conv {
        /// Height of input matrix A.
        #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
        a_rows: i64,
        /// Width of input matrix A.
        #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
        a_cols: i64,
        /// Kernel side length (kernel is w_dim x w_dim).
        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        w_dim: i64,
        #[command(flatten)]
        common: CommonArgs,
        /// File name for party 1 input (within --dir).
        #[arg(long, default_value = DEFAULT_P1_FILE)]
        p1_file: String,
        #[command(flatten)]
        sign: SignArgs,
    },
    /// Linear layer y = W x + b: x for party 0, W then b for party 1.
    Linear {
        /// Dimension n (x: n, W: n x n, b: n).
        #[arg(long, default_value_t = 2048, allow_negative_numbers = true)]
        n: i64,
        #[command(flatten)]
        common: CommonArgs,
        /// File name for party 1 input (within --dir).
        #[arg(long, default_value = DEFAULT_P1_FILE)]
        p1_file: String,
        #[command(flatten)]
        sign: SignArgs,
    },
    /// Inspect a party file's rows and value bounds.
    Inspect {
        /// Path to the party file.
        path: PathBuf,
        /// Check values against the range for this bit width.
        #[arg(long, allow_negative_numbers = true)]
        bits: Option<i64>,
        /// Use the signed range for --bits.
        #[arg(long, requires = "bits")]
        signed: bool,
        /// Output format.
        #[arg(long, value_enum, default_value_t = InspectFormat::Pretty)]
        format: InspectFormat,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// PRNG seed for reproducibility (any integer).
    #[arg(long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    seed: i64,
    /// Bit width for values (1..=31).
    #[arg(long, default_value_t = DEFAULT_BITS, allow_negative_numbers = true)]
    bits: i64,
    /// Output directory.
    #[arg(long, default_value = DEFAULT_DIR)]
    dir: PathBuf,
    /// File name for party 0 input (within --dir).
    #[arg(long, default_value = DEFAULT_P0_FILE)]
    p0_file: String,
    /// Also write the run summary as JSON to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

#[derive(Args)]
struct SignArgs {
    /// Use the signed range [-2^(bits-1), 2^(bits-1)-1].
    #[arg(long, conflicts_with = "unsigned")]
    signed: bool,
    /// Use the unsigned range [0, 2^bits-1].
    #[arg(long)]
    unsigned: bool,
}

impl SignArgs {
    /// `None` leaves the choice to the scenario default.
    const fn resolve(&self) -> Option<bool> {
        if self.signed {
            Some(true)
        } else if self.unsigned {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InspectFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.command {
        Command::Ltz { len, common, sign } => {
            run_scenario(RawShape::Ltz { len }, common, None, &sign)
        }
        Command::Conv {
            a_rows,
            a_cols,
            w_dim,
            common,
            p1_file,
            sign,
        } => run_scenario(
            RawShape::Conv {
                a_rows,
                a_cols,
                w_dim,
            },
            common,
            Some(p1_file),
            &sign,
        ),
        Command::Linear {
            n,
            common,
            p1_file,
            sign,
        } => run_scenario(RawShape::Linear { n }, common, Some(p1_file), &sign),
        Command::Inspect {
            path,
            bits,
            signed,
            format,
        } => run_inspect(&path, bits, signed, format),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_params(
    shape: RawShape,
    common: CommonArgs,
    p1_file: Option<String>,
    sign: &SignArgs,
) -> (ScenarioParams, Option<PathBuf>) {
    let params = ScenarioParams {
        shape,
        bits: common.bits,
        signed: sign.resolve(),
        seed: common.seed,
        output: OutputFiles {
            dir: common.dir,
            p0_file: common.p0_file,
            p1_file,
        },
    };
    (params, common.summary_json)
}

fn run_scenario(
    shape: RawShape,
    common: CommonArgs,
    p1_file: Option<String>,
    sign: &SignArgs,
) -> Result<()> {
    let (params, summary_json) = build_params(shape, common, p1_file, sign);
    let (config, report) = run(&params).context("generate fixture files")?;

    // Reporting is best-effort from here on; the files are complete.
    let summary = Summary::collect(&config, &report);
    let mut stdout = io::stdout().lock();
    if let Err(err) = writeln!(stdout, "{}", format_summary_pretty(&summary)) {
        warn!(error = %err, "failed to print summary");
    }
    if let Some(path) = summary_json {
        if let Err(err) = write_summary_json(&path, &summary) {
            let message = format!("{err:#}");
            warn!(error = %message, "failed to write summary json");
        }
    }
    Ok(())
}

fn write_summary_json(path: &Path, summary: &Summary) -> Result<()> {
    let contents = serde_json::to_string_pretty(summary).context("serialize summary")?;
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

fn run_inspect(path: &Path, bits: Option<i64>, signed: bool, format: InspectFormat) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("read party file {}", path.display()))?;
    let expected_range = bits
        .map(|bits| BitWidth::new(bits).map(|bits| ValueRange::derive(bits, signed)))
        .transpose()
        .context("invalid --bits")?;
    let report = inspect_party_bytes(&bytes, expected_range)
        .with_context(|| format!("parse party file {}", path.display()))?;
    let rendered = match format {
        InspectFormat::Json => serde_json::to_string_pretty(&report).context("serialize json")?,
        InspectFormat::Pretty => format_inspect_pretty(&report),
    };
    if let Err(err) = writeln!(io::stdout().lock(), "{rendered}") {
        warn!(error = %err, "failed to print inspect report");
    }
    if report.out_of_range > 0 {
        anyhow::bail!(
            "{} values in {} fall outside the expected range",
            report.out_of_range,
            path.display()
        );
    }
    Ok(())
}
