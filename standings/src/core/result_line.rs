//! Parser for `position#driver#constructor#M:SS.mmm` result lines.

use crate::core::error::ResultError;
use crate::core::lap_time::parse_time;
use crate::core::types::RoundResult;

/// Field separator on a result line.
pub const FIELD_DELIMITER: char = '#';

const FIELD_COUNT: usize = 4;

/// Parse a single result line.
///
/// Position 0 is accepted here and rejected by
/// [`apply_result`](crate::core::standings::apply_result).
/// Driver and constructor names are kept verbatim; only the position and time
/// fields tolerate surrounding whitespace.
pub fn parse_result_line(line: &str) -> Result<RoundResult, ResultError> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() != FIELD_COUNT {
        return Err(ResultError::MalformedResultLine {
            line: line.to_string(),
            fields: fields.len(),
        });
    }

    let position = parse_position(fields[0])?;
    let driver = non_empty(line, fields[1], "driver")?;
    let constructor = non_empty(line, fields[2], "constructor")?;
    let time = parse_time(fields[3])?;

    Ok(RoundResult {
        position,
        driver,
        constructor,
        time,
    })
}

/// Parse a position field as a non-negative integer.
pub fn parse_position(field: &str) -> Result<u32, ResultError> {
    field
        .trim()
        .parse::<u32>()
        .map_err(|_| ResultError::InvalidPosition {
            value: field.to_string(),
        })
}

fn non_empty(line: &str, field: &str, label: &'static str) -> Result<String, ResultError> {
    if field.trim().is_empty() {
        return Err(ResultError::EmptyName {
            line: line.to_string(),
            field: label,
        });
    }
    Ok(field.to_string())
}
