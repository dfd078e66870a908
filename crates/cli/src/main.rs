//! Trace-driven cache simulator CLI.
//!
//! This binary replays a Valgrind memory trace against a set-associative LRU
//! cache and prints the totals. It performs:
//! 1. **Configuration:** Geometry from `-s/-E/-b`, optionally layered over a JSON `--config` file.
//! 2. **Replay:** Lazily reads the trace and probes the cache once per data access.
//! 3. **Reporting:** `hits:H misses:M evictions:E` (or JSON), plus per-access lines with `-v`.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use csim_core::common::{ConfigError, SimError, TraceError};
use csim_core::config::ParamOverrides;
use csim_core::sim::{Simulator, StepReport, loader};
use csim_core::{CacheParams, Results};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Set-associative LRU cache simulator",
    long_about = "Replay a Valgrind memory trace against a set-associative cache with LRU replacement \
                  and report hits, misses, and evictions.\n\nExamples:\n  \
                  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  \
                  csim -v -s 8 -E 2 -b 4 -t traces/trans.trace\n  \
                  csim --config l1.json -E 4 -t traces/long.trace --json"
)]
struct Cli {
    /// Print the outcome of every access.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (the cache has 2^s sets).
    #[arg(short = 's', value_name = "s")]
    set_bits: Option<u32>,

    /// Associativity (lines per set).
    #[arg(short = 'E', value_name = "E")]
    ways: Option<usize>,

    /// Number of block offset bits (blocks are 2^b bytes).
    #[arg(short = 'b', value_name = "b")]
    block_bits: Option<u32>,

    /// Valgrind trace to replay.
    #[arg(short = 't', long = "trace", value_name = "tracefile")]
    trace: PathBuf,

    /// JSON geometry file ({"s": .., "E": .., "b": ..}); flags override its values.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the results as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Also write `hits misses evictions` to this file.
    #[arg(long, value_name = "PATH")]
    results_file: Option<PathBuf>,
}

/// Anything that ends a CLI run early.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("cannot encode results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write results to '{}': {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Installs a stderr `tracing` subscriber; `RUST_LOG` overrides the `warn` default.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Merges command-line flags over the optional config file.
fn resolve_params(cli: &Cli) -> Result<CacheParams, ConfigError> {
    let flags = ParamOverrides {
        s: cli.set_bits,
        e: cli.ways,
        b: cli.block_bits,
    };
    let file = match &cli.config {
        Some(path) => loader::load_params(path)?,
        None => ParamOverrides::default(),
    };
    flags.or(file).resolve()
}

/// Runs one simulation and reports it.
fn run(cli: &Cli) -> Result<(), CliError> {
    let params = resolve_params(cli)?;
    tracing::info!(%params, trace = %cli.trace.display(), "starting simulation");

    let mut sim = Simulator::new(&params)?;
    let trace = loader::open_trace(&cli.trace)?;

    let results = if cli.verbose {
        sim.run_with(trace, print_step)?
    } else {
        sim.run(trace)?
    };

    report(cli, &results)
}

fn print_step(step: &StepReport) {
    if !step.is_ignored() {
        println!("{step}");
    }
}

fn report(cli: &Cli, results: &Results) -> Result<(), CliError> {
    if cli.json {
        println!("{}", results.to_json()?);
    } else {
        results.print();
    }

    if let Some(path) = &cli.results_file {
        loader::save_results(path, results).map_err(|source| CliError::Output {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}
