//! Per-round JSON snapshots of the standings.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::core::standings::Standings;
use crate::core::types::{ConstructorStanding, DriverStanding};
use crate::ingest::{RoundObserver, RoundReport};
use crate::io::files::write_json;

#[derive(Debug, Serialize)]
pub struct RoundSnapshot<'a> {
    pub round: u32,
    pub label: &'a str,
    pub drivers: &'a [DriverStanding],
    pub constructors: &'a [ConstructorStanding],
    pub anomalies: &'a BTreeMap<String, Vec<String>>,
}

impl<'a> RoundSnapshot<'a> {
    pub fn new(round: u32, label: &'a str, standings: &'a Standings) -> Self {
        Self {
            round,
            label,
            drivers: standings.drivers(),
            constructors: standings.constructors(),
            anomalies: standings.anomalies(),
        }
    }
}

/// `<dir>/round-<n>.json`
pub fn snapshot_path(dir: &Path, round: u32) -> PathBuf {
    dir.join(format!("round-{round}.json"))
}

pub fn write_snapshot(dir: &Path, snapshot: &RoundSnapshot<'_>) -> Result<PathBuf> {
    let path = snapshot_path(dir, snapshot.round);
    write_json(&path, snapshot)?;
    Ok(path)
}

/// Writes one snapshot per completed round.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Snapshot files written so far, in round order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RoundObserver for SnapshotWriter {
    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()> {
        let snapshot = RoundSnapshot::new(report.round, report.label, report.standings);
        let path = write_snapshot(&self.dir, &snapshot)?;
        tracing::debug!(round = report.round, path = %path.display(), "snapshot written");
        self.written.push(path);
        Ok(())
    }
}
