//! Test-only helpers for building results, streams, and observers.

use anyhow::Result;

use crate::core::lap_time::LapTime;
use crate::core::types::{RoundResult, TeamChange};
use crate::ingest::{END_MARKER, ROUND_SEPARATOR, RoundObserver, RoundReport};

/// Create a result with a fixed, irrelevant stage time.
pub fn result(position: u32, driver: &str, constructor: &str) -> RoundResult {
    RoundResult {
        position,
        driver: driver.to_string(),
        constructor: constructor.to_string(),
        time: LapTime::new(1, 0, 0),
    }
}

/// Build a results stream from `(label, lines)` rounds, terminated by `END`.
pub fn stream(rounds: &[(&str, &[&str])]) -> String {
    let mut out = String::new();
    for (label, lines) in rounds {
        out.push_str(label);
        out.push('\n');
        out.push_str(ROUND_SEPARATOR);
        out.push('\n');
        for line in *lines {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(ROUND_SEPARATOR);
        out.push('\n');
    }
    out.push_str(END_MARKER);
    out.push('\n');
    out
}

/// Three-round season with one driver switching constructors.
pub fn sample_season() -> String {
    stream(&[
        (
            "Rallye Monte-Carlo",
            &[
                "1#Thierry Neuville#Hyundai#197:25.100",
                "2#Sebastien Ogier#Toyota#197:43.000",
                "3#Elfyn Evans#Toyota#198:01.500",
            ],
        ),
        (
            "Rally Sweden",
            &[
                "1#Esapekka Lappi#Hyundai#161:07.200",
                "2#Elfyn Evans#Toyota#161:20.900",
                "3#Thierry Neuville#Hyundai#161:35.000",
            ],
        ),
        (
            "Safari Rally Kenya",
            &[
                "1#Kalle Rovanpera#Toyota#213:19.300",
                "2#Esapekka Lappi#Toyota#214:00.000",
                "3#Thierry Neuville#Hyundai#215:10.400",
            ],
        ),
    ])
}

/// Records every event for assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub started: Vec<String>,
    pub changes: Vec<TeamChange>,
    /// Round number and `(driver, points)` in reported order.
    pub completed: Vec<(u32, Vec<(String, u32)>)>,
}

impl RoundObserver for RecordingObserver {
    fn round_started(&mut self, _round: u32, label: &str) -> Result<()> {
        self.started.push(label.to_string());
        Ok(())
    }

    fn team_change(&mut self, change: &TeamChange) -> Result<()> {
        self.changes.push(change.clone());
        Ok(())
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()> {
        let drivers = report
            .standings
            .drivers()
            .iter()
            .map(|driver| (driver.name.clone(), driver.points))
            .collect();
        self.completed.push((report.round, drivers));
        Ok(())
    }
}
