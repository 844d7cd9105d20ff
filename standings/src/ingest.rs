//! Round ingestion loop: reads round blocks and folds them into the standings.
//!
//! Input shape:
//!
//! ```text
//! <round label>
//! ---------------------
//! <position>#<driver>#<constructor>#<M:SS.mmm>
//! ...
//! ---------------------
//! ...
//! END
//! ```
//!
//! Each result line is parsed and applied exactly once. After a block's closing
//! separator the standings are sorted and the observer is told the round is
//! complete.

use std::io::{self, BufRead};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::error::ResultError;
use crate::core::result_line::parse_result_line;
use crate::core::standings::{Standings, apply_result};
use crate::core::types::TeamChange;

/// Line that opens and closes the results of a round.
pub const ROUND_SEPARATOR: &str = "---------------------";
/// Line that ends the whole stream.
pub const END_MARKER: &str = "END";

/// Handling of result lines that fail to parse or apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Stop the run at the first bad line, keeping what was already applied.
    #[default]
    Abort,
    /// Log the bad line and continue with the next one.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    pub malformed_lines: MalformedLinePolicy,
}

/// Structural problems with the results stream.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("read line {line_no}")]
    Read {
        line_no: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line_no}")]
    BadResult {
        line_no: usize,
        #[source]
        source: ResultError,
    },

    #[error("line {line_no}: expected separator line after round label {label:?}, found {found:?}")]
    MissingSeparator {
        line_no: usize,
        label: String,
        found: String,
    },

    #[error("round {round} ({label:?}) has no closing separator before end of input")]
    UnterminatedRound { round: u32, label: String },
}

/// A completed round, handed to observers after sorting.
#[derive(Debug, Clone, Copy)]
pub struct RoundReport<'a> {
    pub round: u32,
    pub label: &'a str,
    pub standings: &'a Standings,
}

/// Receives ingestion events. Errors abort the run.
pub trait RoundObserver {
    fn round_started(&mut self, _round: u32, _label: &str) -> Result<()> {
        Ok(())
    }

    fn team_change(&mut self, _change: &TeamChange) -> Result<()> {
        Ok(())
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()>;
}

impl RoundObserver for () {
    fn round_completed(&mut self, _report: &RoundReport<'_>) -> Result<()> {
        Ok(())
    }
}

impl<T: RoundObserver> RoundObserver for Option<T> {
    fn round_started(&mut self, round: u32, label: &str) -> Result<()> {
        match self {
            Some(inner) => inner.round_started(round, label),
            None => Ok(()),
        }
    }

    fn team_change(&mut self, change: &TeamChange) -> Result<()> {
        match self {
            Some(inner) => inner.team_change(change),
            None => Ok(()),
        }
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()> {
        match self {
            Some(inner) => inner.round_completed(report),
            None => Ok(()),
        }
    }
}

impl<A: RoundObserver, B: RoundObserver> RoundObserver for (A, B) {
    fn round_started(&mut self, round: u32, label: &str) -> Result<()> {
        self.0.round_started(round, label)?;
        self.1.round_started(round, label)
    }

    fn team_change(&mut self, change: &TeamChange) -> Result<()> {
        self.0.team_change(change)?;
        self.1.team_change(change)
    }

    fn round_completed(&mut self, report: &RoundReport<'_>) -> Result<()> {
        self.0.round_completed(report)?;
        self.1.round_completed(report)
    }
}

/// Counts for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub rounds: u32,
    /// Result lines applied to the standings.
    pub results: usize,
    /// Result lines dropped under [`MalformedLinePolicy::Skip`].
    pub skipped: usize,
    /// False if input ran out before the end marker.
    pub saw_end_marker: bool,
}

/// Read round blocks from `reader` until the end marker, updating `standings`.
///
/// On error, results applied before the failing line stay in `standings`.
pub fn ingest<R: BufRead, O: RoundObserver>(
    reader: R,
    standings: &mut Standings,
    options: &IngestOptions,
    observer: &mut O,
) -> Result<IngestSummary> {
    let mut lines = NumberedLines::new(reader);
    let mut summary = IngestSummary::default();

    loop {
        let Some(InputLine { text: label, .. }) = lines.next_non_blank()? else {
            warn!(rounds = summary.rounds, "input ended without END marker");
            break;
        };
        if label.trim() == END_MARKER {
            summary.saw_end_marker = true;
            break;
        }

        summary.rounds += 1;
        let round = summary.rounds;
        info!(round, label = %label, "reading round");
        observer.round_started(round, &label)?;

        match lines.next_non_blank()? {
            Some(line) if line.text.trim() == ROUND_SEPARATOR => {}
            Some(line) => {
                return Err(IngestError::MissingSeparator {
                    line_no: line.line_no,
                    label,
                    found: line.text,
                }
                .into());
            }
            None => return Err(IngestError::UnterminatedRound { round, label }.into()),
        }

        loop {
            let Some(InputLine {
                line_no,
                text: line,
                utf8,
            }) = lines.next_non_blank()?
            else {
                return Err(IngestError::UnterminatedRound { round, label }.into());
            };
            if line.trim() == ROUND_SEPARATOR {
                break;
            }

            let parsed = if utf8 {
                parse_result_line(&line)
            } else {
                Err(ResultError::InvalidEncoding { line: line.clone() })
            };
            let outcome = match parsed.and_then(|result| apply_result(standings, &result)) {
                Ok(outcome) => outcome,
                Err(source) => match options.malformed_lines {
                    MalformedLinePolicy::Abort => {
                        return Err(IngestError::BadResult { line_no, source }.into());
                    }
                    MalformedLinePolicy::Skip => {
                        warn!(line_no, line = %line, error = %source, "skipping result line");
                        summary.skipped += 1;
                        continue;
                    }
                },
            };

            summary.results += 1;
            debug!(line_no, points = outcome.points, "result applied");
            if let Some(change) = &outcome.team_change {
                info!(
                    driver = %change.driver,
                    previous = %change.previous,
                    current = %change.current,
                    "driver changed constructor"
                );
                observer.team_change(change)?;
            }
        }

        standings.sort_championships();
        info!(
            round,
            drivers = standings.drivers().len(),
            constructors = standings.constructors().len(),
            "round complete"
        );
        observer.round_completed(&RoundReport {
            round,
            label: &label,
            standings: &*standings,
        })?;
    }

    Ok(summary)
}

/// One input line without its terminator.
///
/// Bytes that are not UTF-8 are decoded lossily into `text` and flagged, so
/// structure lines still match while result lines go through the policy.
struct InputLine {
    line_no: usize,
    text: String,
    utf8: bool,
}

struct NumberedLines<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> NumberedLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<Option<InputLine>, IngestError> {
        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| IngestError::Read {
                line_no: self.line_no + 1,
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let mut bytes = self.buf.as_slice();
        if let Some(rest) = bytes.strip_suffix(b"\n") {
            bytes = rest;
        }
        if let Some(rest) = bytes.strip_suffix(b"\r") {
            bytes = rest;
        }
        let (text, utf8) = match std::str::from_utf8(bytes) {
            Ok(text) => (text.to_string(), true),
            Err(_) => (String::from_utf8_lossy(bytes).into_owned(), false),
        };
        Ok(Some(InputLine {
            line_no: self.line_no,
            text,
            utf8,
        }))
    }

    fn next_non_blank(&mut self) -> Result<Option<InputLine>, IngestError> {
        while let Some(line) = self.next_line()? {
            if !line.text.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingObserver, stream};

    fn run<I: AsRef<[u8]>>(
        input: I,
        options: IngestOptions,
    ) -> (Result<IngestSummary>, Standings, RecordingObserver) {
        let mut standings = Standings::new();
        let mut observer = RecordingObserver::default();
        let outcome = ingest(input.as_ref(), &mut standings, &options, &mut observer);
        (outcome, standings, observer)
    }

    #[test]
    fn reports_once_per_round_in_sorted_order() {
        let input = stream(&[
            (
                "Rally Sweden",
                &["1#Ott#Toyota#1:00.000", "2#Kalle#Toyota#1:01.000"],
            ),
            (
                "Safari",
                &["1#Kalle#Toyota#2:00.000", "2#Thierry#Hyundai#2:01.000"],
            ),
        ]);
        let (outcome, standings, observer) = run(&input, IngestOptions::default());
        let summary = outcome.expect("ingest");

        assert_eq!(
            summary,
            IngestSummary {
                rounds: 2,
                results: 4,
                skipped: 0,
                saw_end_marker: true,
            }
        );
        assert_eq!(observer.started, vec!["Rally Sweden", "Safari"]);
        assert_eq!(
            observer.completed,
            vec![
                (1, vec![("Ott".to_string(), 25), ("Kalle".to_string(), 18)]),
                (
                    2,
                    vec![
                        ("Kalle".to_string(), 43),
                        ("Ott".to_string(), 25),
                        ("Thierry".to_string(), 18),
                    ]
                ),
            ]
        );
        assert_eq!(standings.constructors()[0].name, "Toyota");
        assert_eq!(standings.constructors()[0].points, 68);
        assert_eq!(standings.constructors()[0].wins, 2);
    }

    #[test]
    fn empty_round_still_reports() {
        let input = stream(&[("Cancelled", &[])]);
        let (outcome, standings, observer) = run(&input, IngestOptions::default());
        assert_eq!(outcome.expect("ingest").rounds, 1);
        assert_eq!(observer.completed, vec![(1, Vec::new())]);
        assert!(standings.drivers().is_empty());
    }

    #[test]
    fn malformed_line_aborts_after_applying_earlier_results() {
        let input = stream(&[
            ("Monte Carlo", &["1#Seb#Toyota#3:00.000"]),
            (
                "Sweden",
                &[
                    "1#Ott#Toyota#1:00.000",
                    "2#Kalle#Toyota",
                    "3#Elfyn#Toyota#1:02.000",
                ],
            ),
        ]);
        let (outcome, standings, observer) = run(&input, IngestOptions::default());
        let err = outcome.expect_err("malformed");
        let ingest_err = err.downcast_ref::<IngestError>().expect("ingest error");
        match ingest_err {
            IngestError::BadResult { line_no, source } => {
                assert_eq!(*line_no, 8);
                assert!(matches!(
                    source,
                    ResultError::MalformedResultLine { fields: 3, .. }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(observer.completed.len(), 1);
        assert_eq!(standings.driver("Ott").expect("ott").points, 25);
        assert!(standings.driver("Elfyn").is_none());
    }

    #[test]
    fn skip_policy_drops_bad_lines() {
        let input = stream(&[(
            "Sweden",
            &[
                "1#Ott#Toyota#1:00.000",
                "x#Kalle#Toyota#1:00.000",
                "0#Seb#Toyota#1:00.000",
                "2#Elfyn#Toyota#1:02.000",
            ],
        )]);
        let options = IngestOptions {
            malformed_lines: MalformedLinePolicy::Skip,
        };
        let (outcome, standings, _) = run(&input, options);
        let summary = outcome.expect("ingest");
        assert_eq!(summary.results, 2);
        assert_eq!(summary.skipped, 2);
        assert_eq!(standings.constructor("Toyota").expect("toyota").points, 43);
        assert!(standings.driver("Seb").is_none());
    }

    #[test]
    fn team_changes_reach_the_observer() {
        let input = stream(&[
            ("Round 1", &["1#Max#RedBull#1:30.500"]),
            ("Round 2", &["1#Max#Ferrari#1:29.100"]),
        ]);
        let (outcome, standings, observer) = run(&input, IngestOptions::default());
        outcome.expect("ingest");
        assert_eq!(
            observer.changes,
            vec![TeamChange {
                driver: "Max".to_string(),
                previous: "RedBull".to_string(),
                current: "Ferrari".to_string(),
            }]
        );
        assert_eq!(standings.driver("Max").expect("max").points, 50);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let input = "Round 1\r\n---------------------\r\n\r\n1#Max#RedBull#1:30.500\r\n---------------------\r\n\r\nEND\r\n";
        let (outcome, standings, _) = run(input, IngestOptions::default());
        let summary = outcome.expect("ingest");
        assert_eq!(summary.results, 1);
        assert!(summary.saw_end_marker);
        assert_eq!(standings.drivers()[0].name, "Max");
        assert_eq!(standings.constructors()[0].name, "RedBull");
    }

    #[test]
    fn lines_after_end_marker_are_ignored() {
        let input = format!("{}Round 9\n---------------------\n1#Late#Ford#1:00.000\n", stream(&[]));
        let (outcome, standings, _) = run(&input, IngestOptions::default());
        assert_eq!(outcome.expect("ingest").rounds, 0);
        assert!(standings.drivers().is_empty());
    }

    #[test]
    fn missing_end_marker_is_not_an_error() {
        let input = "Round 1\n---------------------\n1#Max#RedBull#1:30.500\n---------------------\n";
        let (outcome, _, observer) = run(input, IngestOptions::default());
        let summary = outcome.expect("ingest");
        assert!(!summary.saw_end_marker);
        assert_eq!(observer.completed.len(), 1);
    }

    #[test]
    fn unterminated_round_is_an_error() {
        let input = "Round 1\n---------------------\n1#Max#RedBull#1:30.500\n";
        let (outcome, standings, observer) = run(input, IngestOptions::default());
        let err = outcome.expect_err("unterminated");
        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::UnterminatedRound { round: 1, .. })
        ));
        assert!(observer.completed.is_empty());
        assert_eq!(standings.drivers().len(), 1);
    }

    #[test]
    fn label_must_be_followed_by_separator() {
        let input = "Round 1\n1#Max#RedBull#1:30.500\n---------------------\nEND\n";
        let (outcome, _, _) = run(input, IngestOptions::default());
        let err = outcome.expect_err("missing separator");
        match err.downcast_ref::<IngestError>() {
            Some(IngestError::MissingSeparator { line_no, label, .. }) => {
                assert_eq!(*line_no, 2);
                assert_eq!(label, "Round 1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    const LATIN1_SEASON: &[u8] = b"Round 1\n---------------------\n1#Ott#Toyota#1:00.000\n2#S\xE9bastien#Toyota#1:01.000\n3#Kalle#Toyota#1:02.000\n---------------------\nEND\n";

    #[test]
    fn non_utf8_result_line_is_skipped_and_round_completes() {
        let options = IngestOptions {
            malformed_lines: MalformedLinePolicy::Skip,
        };
        let (outcome, standings, observer) = run(LATIN1_SEASON, options);
        let summary = outcome.expect("ingest");

        assert_eq!(summary.results, 2);
        assert_eq!(summary.skipped, 1);
        assert!(summary.saw_end_marker);
        assert_eq!(
            observer.completed,
            vec![(1, vec![("Ott".to_string(), 25), ("Kalle".to_string(), 15)])]
        );
        assert_eq!(standings.constructor("Toyota").expect("toyota").points, 40);
    }

    #[test]
    fn non_utf8_result_line_aborts_with_its_line_number() {
        let (outcome, standings, observer) = run(LATIN1_SEASON, IngestOptions::default());
        let err = outcome.expect_err("invalid utf-8");
        match err.downcast_ref::<IngestError>() {
            Some(IngestError::BadResult { line_no, source }) => {
                assert_eq!(*line_no, 4);
                match source {
                    ResultError::InvalidEncoding { line } => {
                        assert!(line.starts_with("2#S"));
                        assert!(line.ends_with("bastien#Toyota#1:01.000"));
                    }
                    other => panic!("unexpected result error: {other:?}"),
                }
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(standings.drivers().len(), 1);
        assert!(observer.completed.is_empty());
    }

    #[test]
    fn non_utf8_label_is_decoded_lossily() {
        let input: &[u8] = b"Rally M\xE9xico\n---------------------\n1#Ott#Toyota#1:00.000\n---------------------\nEND\n";
        let (outcome, _, observer) = run(input, IngestOptions::default());
        outcome.expect("ingest");
        assert_eq!(observer.started, vec!["Rally M\u{FFFD}xico"]);
    }

    #[test]
    fn input_ending_after_label_is_unterminated() {
        let (outcome, _, observer) = run("Round 1\n", IngestOptions::default());
        let err = outcome.expect_err("unterminated");
        assert!(matches!(
            err.downcast_ref::<IngestError>(),
            Some(IngestError::UnterminatedRound { round: 1, label }) if label == "Round 1"
        ));
        assert_eq!(observer.started, vec!["Round 1"]);
        assert!(observer.completed.is_empty());
    }

    struct BrokenReader;

    impl io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn read_failure_reports_the_line_being_read() {
        use std::io::Read;

        let reader = io::BufReader::new(
            "Round 1\n---------------------\n".as_bytes().chain(BrokenReader),
        );
        let mut standings = Standings::new();
        let err = ingest(
            reader,
            &mut standings,
            &IngestOptions::default(),
            &mut RecordingObserver::default(),
        )
        .expect_err("read failure");

        match err.downcast_ref::<IngestError>() {
            Some(IngestError::Read { line_no, source }) => {
                assert_eq!(*line_no, 3);
                assert_eq!(source.to_string(), "device unplugged");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
