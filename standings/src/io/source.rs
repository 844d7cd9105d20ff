//! Opening the round-results line source.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// The results file could not be opened.
#[derive(Debug, Error)]
#[error("cannot open results file {}", .path.display())]
pub struct SourceUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Open `path` for buffered line reading.
pub fn open_source(path: &Path) -> Result<BufReader<File>, SourceUnavailable> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}
