// Pipeline - runs logs through parse -> validate -> prepare -> score
//
// Each log is independent. A malformed or rejected log never affects the
// others; standings and statistics are built once every log has finished.

use serde::{Serialize, Serializer};

use crate::cabrillo::parse_cabrillo;
use crate::config::Contest;
use crate::error::MalformedLogError;
use crate::preparation::{LogPreparer, PreparedLog};
use crate::scoring::{ScoreRecord, ScoringEngine};
use crate::standings::{build_standings, Standings};
use crate::statistics::{compute_statistics, ContestStatistics};
use crate::validation::{LogValidator, ValidationResult};

/// One submitted log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogInput {
    /// File name or upload id, used in reports
    pub name: String,
    pub text: String,
}

impl LogInput {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// What happened to one log
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LogOutcome {
    /// The file could not be read
    Unreadable { name: String, error: String },
    /// Could not be parsed at all
    Malformed {
        name: String,
        #[serde(serialize_with = "serialize_display")]
        error: MalformedLogError,
    },
    /// Parsed but failed validation
    Rejected {
        name: String,
        validation: ValidationResult,
        report: String,
    },
    Scored {
        name: String,
        validation: ValidationResult,
        prepared: Box<PreparedLog>,
        score: Box<ScoreRecord>,
    },
}

impl LogOutcome {
    pub fn name(&self) -> &str {
        match self {
            LogOutcome::Unreadable { name, .. }
            | LogOutcome::Malformed { name, .. }
            | LogOutcome::Rejected { name, .. }
            | LogOutcome::Scored { name, .. } => name,
        }
    }

    pub fn score(&self) -> Option<&ScoreRecord> {
        match self {
            LogOutcome::Scored { score, .. } => Some(score.as_ref()),
            _ => None,
        }
    }

    /// Text for the problems folder, if the log did not make it to scoring
    pub fn problem_report(&self) -> Option<String> {
        match self {
            LogOutcome::Unreadable { name, error } => Some(format!(
                "LAQP Log Validation Report\n==========================\nFile: {}\nStatus: UNREADABLE\n\n{}\n",
                name, error
            )),
            LogOutcome::Malformed { name, error } => Some(format!(
                "LAQP Log Validation Report\n==========================\nFile: {}\nStatus: MALFORMED\n\n{}\n",
                name, error
            )),
            LogOutcome::Rejected { report, .. } => Some(report.clone()),
            LogOutcome::Scored { .. } => None,
        }
    }
}

/// Run one log through every stage
pub fn process_log(name: &str, text: &str, contest: &Contest) -> LogOutcome {
    let parsed = match parse_cabrillo(text) {
        Ok(parsed) => parsed,
        Err(error) => {
            log::info!("{}: malformed ({})", name, error);
            return LogOutcome::Malformed {
                name: name.to_string(),
                error,
            };
        }
    };

    let validation = LogValidator::new(contest).validate(&parsed);
    if !validation.is_valid() {
        log::info!("{}: rejected with {} errors", name, validation.errors.len());
        let report = validation.to_report();
        return LogOutcome::Rejected {
            name: name.to_string(),
            validation,
            report,
        };
    }

    let prepared = LogPreparer::new(contest).prepare(&parsed);
    let score = ScoringEngine::new(contest).score(&prepared);
    log::info!(
        "{}: {} scored {} ({} QSOs, {} multipliers)",
        name,
        score.callsign,
        score.final_score,
        score.valid_qso_count(),
        score.multiplier_count()
    );

    LogOutcome::Scored {
        name: name.to_string(),
        validation,
        prepared: Box::new(prepared),
        score: Box::new(score),
    }
}

/// Outcomes plus the cross-log aggregates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<LogOutcome>,
    pub standings: Standings,
    pub statistics: ContestStatistics,
}

impl BatchReport {
    pub fn scored(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.outcomes.iter().filter_map(LogOutcome::score)
    }

    pub fn problem_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.score().is_none()).count()
    }
}

/// Build standings and statistics once all outcomes are in
pub fn aggregate(outcomes: Vec<LogOutcome>, contest: &Contest) -> BatchReport {
    let records: Vec<ScoreRecord> = outcomes.iter().filter_map(LogOutcome::score).cloned().collect();
    let standings = build_standings(&records);
    let statistics = compute_statistics(&records, &contest.reference);

    log::info!(
        "Batch complete: {} logs, {} scored, {} problems",
        outcomes.len(),
        records.len(),
        outcomes.len() - records.len()
    );

    BatchReport {
        outcomes,
        standings,
        statistics,
    }
}

pub fn process_batch(inputs: &[LogInput], contest: &Contest) -> BatchReport {
    let outcomes = inputs
        .iter()
        .map(|input| process_log(&input.name, &input.text, contest))
        .collect();
    aggregate(outcomes, contest)
}

/// Verdict for a web upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionCheck {
    pub accepted: bool,
    pub callsign: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Validate an uploaded log without scoring it
pub fn check_submission(text: &str, contest: &Contest) -> SubmissionCheck {
    match parse_cabrillo(text) {
        Err(error) => SubmissionCheck {
            accepted: false,
            callsign: None,
            errors: vec![error.to_string()],
            warnings: Vec::new(),
        },
        Ok(parsed) => {
            let validation = LogValidator::new(contest).validate(&parsed);
            SubmissionCheck {
                accepted: validation.is_valid(),
                callsign: validation.callsign,
                errors: validation.errors,
                warnings: validation.warnings,
            }
        }
    }
}
