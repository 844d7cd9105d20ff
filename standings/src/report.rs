//! Console rendering of the championship tables.

use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{Context, Result};

use crate::core::standings::Standings;
use crate::core::types::TeamChange;
use crate::ingest::{RoundObserver, RoundReport};

const NAME_WIDTH: usize = 30;
const CONSTRUCTOR_WIDTH: usize = 40;
const NUMBER_WIDTH: usize = 10;
const BANNER_WIDTH: usize = 70;

/// Write the post-round banner followed by both championship tables.
pub fn render_standings<W: Write>(out: &mut W, round: u32, standings: &Standings) -> Result<()> {
    let rule = "#".repeat(BANNER_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(
        out,
        "############################# AFTER ROUND {round} ##########################"
    )?;
    writeln!(out, "{rule}\n")?;

    writeln!(
        out,
        "{:<NAME_WIDTH$}{:<CONSTRUCTOR_WIDTH$}{}",
        "Driver", "Constructor", "Points"
    )?;
    writeln!(out, "{}", "-".repeat(NAME_WIDTH + CONSTRUCTOR_WIDTH + NUMBER_WIDTH))?;
    for driver in standings.drivers() {
        writeln!(
            out,
            "{:<NAME_WIDTH$}{:<CONSTRUCTOR_WIDTH$}{}",
            driver.name, driver.constructor, driver.points
        )?;
    }

    writeln!(out, "\n")?;
    writeln!(
        out,
        "{:<NAME_WIDTH$}{:<NUMBER_WIDTH$}{}",
        "Manufacturer", "Points", "Wins"
    )?;
    writeln!(out, "{}", "-".repeat(NAME_WIDTH + CONSTRUCTOR_WIDTH + NUMBER_WIDTH))?;
    for constructor in standings.constructors() {
        writeln!(
            out,
            "{:<NAME_WIDTH$}{:<NUMBER_WIDTH$}{}",
            constructor.name, constructor.points, constructor.wins
        )?;
    }
    Ok(())
}

/// Write the end-of-run list of drivers seen with more than one constructor.
///
/// Writes nothing when the log is empty.
pub fn render_anomalies<W: Write>(
    out: &mut W,
    anomalies: &BTreeMap<String, Vec<String>>,
) -> Result<()> {
    if anomalies.is_empty() {
        return Ok(());
    }
    writeln!(out, "The following drivers have used a different car:")?;
    for (driver, cars) in anomalies {
        writeln!(out, "Driver: {driver}")?;
        writeln!(out, "Cars: {}", cars.join(", "))?;
    }
    Ok(())
}

/// Prints progress and standings tables as rounds are ingested.
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn reading_started(&mut self) -> Result<()> {
        writeln!(self.out, "Reading the previous times from the files...").context("write stdout")
    }

    pub fn reading_done(&mut self, standings: &Standings) -> Result<()> {
        writeln!(self.out, "Reading done.").context("write stdout")?;
        render_anomalies(&mut self.out, standings.anomalies())?;
        self.out.flush().context("flush stdout")
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RoundObserver for ConsoleReporter<W> {
    fn round_started(&mut self, _round: u32, label: &str) -> Result<()> {
        writeln!(self.out, "READING ROUND: {label}").context("write stdout")
    }

    fn team_change(&mut self, change: &TeamChange) -> Result<()> {
        writeln!(
            self.out,
            "Found one driver not using the same car all season: {} ({} -> {})",
            change.driver, change.previous, change.current
        )
        .context("write stdout")
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()> {
        render_standings(&mut self.out, report.round, report.standings)
    }
}
