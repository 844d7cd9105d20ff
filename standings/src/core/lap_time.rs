//! Lap/stage durations in `M:SS.mmm` form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::ResultError;

/// A stage duration as recorded on a result line.
///
/// Not used for scoring. Seconds and milliseconds are stored as parsed, without
/// range checks, so out-of-range input survives a parse/format cycle unchanged
/// apart from zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LapTime {
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl LapTime {
    pub fn new(minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Self {
            minutes,
            seconds,
            milliseconds,
        }
    }
}

/// Parse `M:SS.mmm`. The `:` must come before the `.`, and all three groups
/// must be plain decimal digits.
pub fn parse_time(text: &str) -> Result<LapTime, ResultError> {
    let malformed = || ResultError::MalformedTime {
        text: text.to_string(),
    };
    let trimmed = text.trim();
    let (minutes, rest) = trimmed.split_once(':').ok_or_else(malformed)?;
    let (seconds, millis) = rest.split_once('.').ok_or_else(malformed)?;
    Ok(LapTime {
        minutes: parse_digits(minutes).ok_or_else(malformed)?,
        seconds: parse_digits(seconds).ok_or_else(malformed)?,
        milliseconds: parse_digits(millis).ok_or_else(malformed)?,
    })
}

fn parse_digits(group: &str) -> Option<u32> {
    if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    group.parse().ok()
}

impl FromStr for LapTime {
    type Err = ResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s)
    }
}

impl fmt::Display for LapTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{:02}.{:03}",
            self.minutes, self.seconds, self.milliseconds
        )
    }
}
