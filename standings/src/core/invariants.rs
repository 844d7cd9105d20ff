//! Structural invariants of a standings store.

use std::collections::HashSet;

use crate::core::sorter::is_sorted_by_points;
use crate::core::standings::Standings;

/// Check invariants the updater is expected to maintain:
/// - No duplicate driver names
/// - No duplicate constructor names
/// - Anomaly entries only for known drivers
/// - Anomaly entries hold whole `(previous, current)` pairs
pub fn validate_standings(standings: &Standings) -> Vec<String> {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for driver in standings.drivers() {
        if !seen.insert(driver.name.as_str()) {
            errors.push(format!("duplicate driver '{}'", driver.name));
        }
    }

    let mut seen = HashSet::new();
    for constructor in standings.constructors() {
        if !seen.insert(constructor.name.as_str()) {
            errors.push(format!("duplicate constructor '{}'", constructor.name));
        }
    }

    for (driver, cars) in standings.anomalies() {
        if standings.driver(driver).is_none() {
            errors.push(format!("anomaly recorded for unknown driver '{}'", driver));
        }
        if cars.is_empty() || cars.len() % 2 != 0 {
            errors.push(format!(
                "anomaly log for '{}' has {} entries, expected a non-zero even count",
                driver,
                cars.len()
            ));
        }
    }

    errors
}

/// Check both championship lists are in descending points order.
pub fn validate_sorted(standings: &Standings) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_sorted_by_points(standings.drivers()) {
        errors.push("drivers must be sorted by points (descending)".to_string());
    }
    if !is_sorted_by_points(standings.constructors()) {
        errors.push("constructors must be sorted by points (descending)".to_string());
    }
    errors
}
