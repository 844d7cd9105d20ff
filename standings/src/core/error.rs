//! Error taxonomy for parsing and applying round results.

use thiserror::Error;

/// Failure to turn input text into a result, or to apply a result to the standings.
///
/// Every variant is terminal for an ingestion run under the default
/// fail-fast policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    /// The line did not split into exactly four `#`-separated fields.
    #[error(
        "malformed result line {line:?}: expected 4 fields (position#driver#constructor#time), found {fields}"
    )]
    MalformedResultLine { line: String, fields: usize },

    /// A driver or constructor field was empty.
    #[error("malformed result line {line:?}: {field} name is empty")]
    EmptyName { line: String, field: &'static str },

    /// Position is not an integer, or is below 1 when applied.
    #[error("invalid position {value:?}: expected an integer >= 1")]
    InvalidPosition { value: String },

    /// Time text does not match `M:SS.mmm`.
    #[error("invalid time {text:?}: expected format M:SS.mmm")]
    MalformedTime { text: String },

    /// The line is not valid UTF-8. `line` holds a lossy decoding.
    #[error("result line {line:?} is not valid UTF-8")]
    InvalidEncoding { line: String },
}
