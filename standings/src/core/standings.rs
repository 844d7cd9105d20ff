//! Standings store and the per-result update rules.

use std::collections::{BTreeMap, HashMap};

use crate::core::error::ResultError;
use crate::core::points::points_for;
use crate::core::sorter::sort_by_points;
use crate::core::types::{
    ApplyOutcome, ConstructorStanding, DriverStanding, RoundResult, TeamChange,
};

/// Cumulative championship state for one ingestion run.
///
/// Entries are created on first sighting and never removed. List order is
/// insertion order until [`Standings::sort_championships`] is called.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standings {
    drivers: Vec<DriverStanding>,
    constructors: Vec<ConstructorStanding>,
    /// Constructor recorded for each driver at first sighting.
    team_history: HashMap<String, String>,
    /// Append-only constructor pairs per driver with a detected team change.
    anomalies: BTreeMap<String, Vec<String>>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drivers(&self) -> &[DriverStanding] {
        &self.drivers
    }

    pub fn constructors(&self) -> &[ConstructorStanding] {
        &self.constructors
    }

    /// Drivers seen with more than one constructor, keyed by driver name.
    pub fn anomalies(&self) -> &BTreeMap<String, Vec<String>> {
        &self.anomalies
    }

    /// Constructor recorded for `driver` when first seen.
    pub fn recorded_constructor(&self, driver: &str) -> Option<&str> {
        self.team_history.get(driver).map(String::as_str)
    }

    pub fn driver(&self, name: &str) -> Option<&DriverStanding> {
        driver_index(&self.drivers, name).map(|index| &self.drivers[index])
    }

    pub fn constructor(&self, name: &str) -> Option<&ConstructorStanding> {
        constructor_index(&self.constructors, name).map(|index| &self.constructors[index])
    }

    /// Stable descending sort of both lists by points.
    pub fn sort_championships(&mut self) {
        sort_by_points(&mut self.drivers);
        sort_by_points(&mut self.constructors);
    }
}

/// Fold one result into the standings.
///
/// Not idempotent: applying the same result twice counts it twice. Callers
/// apply each physical result line exactly once.
pub fn apply_result(
    standings: &mut Standings,
    result: &RoundResult,
) -> Result<ApplyOutcome, ResultError> {
    if result.position < 1 {
        return Err(ResultError::InvalidPosition {
            value: result.position.to_string(),
        });
    }
    let points = points_for(result.position);

    let (new_driver, team_change) = apply_driver(standings, result, points);
    let new_constructor = apply_constructor(&mut standings.constructors, result, points);

    Ok(ApplyOutcome {
        points,
        new_driver,
        new_constructor,
        team_change,
    })
}

fn apply_driver(
    standings: &mut Standings,
    result: &RoundResult,
    points: u32,
) -> (bool, Option<TeamChange>) {
    let Some(index) = driver_index(&standings.drivers, &result.driver) else {
        standings
            .team_history
            .insert(result.driver.clone(), result.constructor.clone());
        standings.drivers.push(DriverStanding {
            name: result.driver.clone(),
            constructor: result.constructor.clone(),
            points,
        });
        return (true, None);
    };

    standings.drivers[index].points += points;

    // The history is only written on first sighting, so every later result with
    // another constructor appends the same pair again.
    let previous = standings
        .team_history
        .get(&result.driver)
        .cloned()
        .unwrap_or_default();
    if previous == result.constructor {
        return (false, None);
    }
    let log = standings.anomalies.entry(result.driver.clone()).or_default();
    log.push(previous.clone());
    log.push(result.constructor.clone());

    (
        false,
        Some(TeamChange {
            driver: result.driver.clone(),
            previous,
            current: result.constructor.clone(),
        }),
    )
}

fn apply_constructor(
    constructors: &mut Vec<ConstructorStanding>,
    result: &RoundResult,
    points: u32,
) -> bool {
    let win = u32::from(result.position == 1);
    match constructor_index(constructors, &result.constructor) {
        Some(index) => {
            let entry = &mut constructors[index];
            entry.points += points;
            entry.wins += win;
            false
        }
        None => {
            constructors.push(ConstructorStanding {
                name: result.constructor.clone(),
                points,
                wins: win,
            });
            true
        }
    }
}

/// Index of the driver named `name`, if present.
pub fn driver_index(drivers: &[DriverStanding], name: &str) -> Option<usize> {
    drivers.iter().position(|driver| driver.name == name)
}

/// Index of the constructor named `name`, if present.
pub fn constructor_index(constructors: &[ConstructorStanding], name: &str) -> Option<usize> {
    constructors
        .iter()
        .position(|constructor| constructor.name == name)
}
