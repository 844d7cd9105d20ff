//! Shared deterministic types for championship standings.
//!
//! These types carry no behaviour beyond construction; the updater in
//! [`crate::core::standings`] owns every mutation.

use serde::{Deserialize, Serialize};

use crate::core::lap_time::LapTime;

/// One parsed result line: a single classified finisher in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub position: u32,
    pub driver: String,
    pub constructor: String,
    pub time: LapTime,
}

/// Cumulative drivers' championship entry.
///
/// `constructor` is the constructor seen when the driver was first recorded.
/// It is not updated on a team change; those are tracked in the anomaly log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStanding {
    pub name: String,
    pub constructor: String,
    pub points: u32,
}

/// Cumulative constructors' championship entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorStanding {
    pub name: String,
    pub points: u32,
    pub wins: u32,
}

/// A driver recorded against a constructor different from their first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamChange {
    pub driver: String,
    pub previous: String,
    pub current: String,
}

/// What a single `apply_result` call did to the standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Points awarded for the result's position.
    pub points: u32,
    /// True if the driver entry was created by this result.
    pub new_driver: bool,
    /// True if the constructor entry was created by this result.
    pub new_constructor: bool,
    /// Set when the driver appeared with a different constructor.
    pub team_change: Option<TeamChange>,
}
