//! Data-set selection: which results stream a run reads.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::io::config::StandingsConfig;

/// Named results streams configured under `[datasets]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSet {
    /// Current season.
    Current,
    /// Historical rallies.
    Classic,
}

impl DataSet {
    /// Map a prompt answer to a data set: `C`/`c` picks classics, anything else current.
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().chars().next() {
            Some('C' | 'c') => Self::Classic,
            _ => Self::Current,
        }
    }

    pub fn path<'a>(&self, config: &'a StandingsConfig) -> &'a Path {
        match self {
            Self::Current => &config.datasets.current,
            Self::Classic => &config.datasets.classic,
        }
    }
}

/// Ask which data set to read.
pub fn prompt_dataset<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<DataSet> {
    write!(
        output,
        "Do you want to read the current season file (W) or the Classics file (C): "
    )
    .context("write prompt")?;
    output.flush().context("flush prompt")?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("read answer")?;
    writeln!(output).context("write prompt")?;
    Ok(DataSet::from_answer(&answer))
}

/// Resolve the results path: an explicit file wins, then a named data set,
/// then whatever `ask` returns.
pub fn resolve_source_path<F>(
    file: Option<PathBuf>,
    dataset: Option<DataSet>,
    config: &StandingsConfig,
    ask: F,
) -> Result<PathBuf>
where
    F: FnOnce() -> Result<DataSet>,
{
    if let Some(file) = file {
        return Ok(file);
    }
    let dataset = match dataset {
        Some(dataset) => dataset,
        None => ask()?,
    };
    Ok(dataset.path(config).to_path_buf())
}
