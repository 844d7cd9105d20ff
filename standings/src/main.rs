//! Championship standings CLI.
//!
//! Reads round results (`.txt` streams of round blocks ending in `END`) and
//! prints the drivers' and constructors' standings after every round.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use standings::core::invariants::{validate_sorted, validate_standings};
use standings::core::standings::Standings;
use standings::exit_codes;
use standings::ingest::{IngestOptions, MalformedLinePolicy, ingest};
use standings::io::config::{DEFAULT_CONFIG_PATH, StandingsConfig, load_config, write_config};
use standings::io::dataset::{DataSet, prompt_dataset, resolve_source_path};
use standings::io::snapshot::SnapshotWriter;
use standings::io::source::{SourceUnavailable, open_source};
use standings::logging;
use standings::report::ConsoleReporter;

#[derive(Parser)]
#[command(
    name = "standings",
    version,
    about = "Drivers' and constructors' championship standings from round results"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read a results file and print both championships after every round.
    Run {
        #[command(flatten)]
        source: SourceArgs,
        /// Write a JSON snapshot of the standings after every round into this directory.
        #[arg(long)]
        snapshot_dir: Option<PathBuf>,
        /// Skip malformed result lines instead of aborting the run.
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Read a results file and verify the final standings without printing tables.
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Write a default config file.
    InitConfig {
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Data set named in the config. Prompts when neither this nor `--file` is given.
    #[arg(long, value_enum, conflicts_with = "file")]
    dataset: Option<DataSet>,
    /// Results file to read.
    #[arg(long)]
    file: Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

impl SourceArgs {
    fn resolve(&self, config: &StandingsConfig) -> Result<PathBuf> {
        resolve_source_path(self.file.clone(), self.dataset, config, || {
            let mut input = io::stdin().lock();
            let mut output = io::stdout();
            prompt_dataset(&mut input, &mut output)
        })
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        let code = if err.downcast_ref::<SourceUnavailable>().is_some() {
            eprintln!("There was an issue opening the file");
            exit_codes::UNAVAILABLE
        } else {
            exit_codes::INVALID
        };
        eprintln!("{:#}", err);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            source,
            snapshot_dir,
            skip_malformed,
        } => cmd_run(&source, snapshot_dir, skip_malformed),
        Command::Check { source } => cmd_check(&source),
        Command::InitConfig { config, force } => cmd_init_config(&config, force),
    }
}

fn cmd_run(source: &SourceArgs, snapshot_dir: Option<PathBuf>, skip_malformed: bool) -> Result<()> {
    let config = load_config(&source.config)?;
    let path = source.resolve(&config)?;
    let reader = open_source(&path)?;

    let options = IngestOptions {
        malformed_lines: if skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            config.malformed_lines
        },
    };
    let snapshots = snapshot_dir.or(config.snapshot_dir).map(SnapshotWriter::new);
    let mut observer = (ConsoleReporter::new(io::stdout().lock()), snapshots);

    observer.0.reading_started()?;
    let mut standings = Standings::new();
    let summary = ingest(reader, &mut standings, &options, &mut observer)
        .with_context(|| format!("ingest {}", path.display()))?;
    debug!(?summary, "ingest finished");
    observer.0.reading_done(&standings)?;
    Ok(())
}

fn cmd_check(source: &SourceArgs) -> Result<()> {
    let config = load_config(&source.config)?;
    let path = source.resolve(&config)?;
    let reader = open_source(&path)?;

    let options = IngestOptions {
        malformed_lines: config.malformed_lines,
    };
    let mut standings = Standings::new();
    let summary = ingest(reader, &mut standings, &options, &mut ())
        .with_context(|| format!("ingest {}", path.display()))?;

    let mut errors = validate_standings(&standings);
    errors.extend(validate_sorted(&standings));
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }

    println!(
        "check: rounds={} results={} skipped={} drivers={} constructors={} anomalies={}",
        summary.rounds,
        summary.results,
        summary.skipped,
        standings.drivers().len(),
        standings.constructors().len(),
        standings.anomalies().len()
    );
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &StandingsConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("init-config: wrote {}", path.display());
    Ok(())
}
