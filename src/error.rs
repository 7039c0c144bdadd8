// Error types for log parsing and configuration loading
//
// Rule violations found by the validator are NOT errors in this sense -
// they are collected into a ValidationResult. Only input that cannot be
// turned into a ParsedLog at all, and broken configuration, end up here.

use std::path::PathBuf;

use thiserror::Error;

/// Why a single Cabrillo line could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedKind {
    #[error("unknown keyword '{0}'")]
    UnknownKeyword(String),
    #[error("too few fields in QSO line (expected 11, found {0})")]
    TooFewFields(usize),
    #[error("too many fields in QSO line (expected at most 12, found {0})")]
    TooManyFields(usize),
    #[error("unparseable frequency '{0}'")]
    BadFrequency(String),
    #[error("unparseable date '{0}' (expected YYYY-MM-DD)")]
    BadDate(String),
    #[error("unparseable time '{0}' (expected HHMM)")]
    BadTime(String),
}

/// A log that failed to parse. Aborts processing for that one log only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct MalformedLogError {
    /// 1-based line number in the submitted text
    pub line: usize,
    pub kind: MalformedKind,
}

impl MalformedLogError {
    pub fn new(line: usize, kind: MalformedKind) -> Self {
        Self { line, kind }
    }
}

/// Failures while loading contest configuration or reference files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid contest configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reference file {0} contains no codes")]
    EmptyReference(PathBuf),
    #[error("contest window ends ({end}) before it starts ({start})")]
    InvalidWindow { start: String, end: String },
}
