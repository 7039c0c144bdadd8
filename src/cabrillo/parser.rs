// Cabrillo Parser
// Handles Cabrillo 2.0/3.0 contest logs as submitted to the Louisiana QSO Party
//
// Every line starts with a KEYWORD: tag. Header tags carry free-form values;
// QSO: lines carry the fixed 11-field LAQP exchange layout:
//
//   QSO: freq mode date time sent-call sent-rst sent-qth rcvd-call rcvd-rst rcvd-qth [tx]
//
// Parsing is lenient about metadata (unknown tags and a missing
// START-OF-LOG/END-OF-LOG bracket become warnings) and strict about QSO
// lines, since a QSO that cannot be read cannot be scored.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::bands::{freq_to_band, Band};
use super::modes::{mode_group, ModeGroup};
use super::time_utils::{parse_cabrillo_date, parse_cabrillo_time};
use crate::error::{MalformedKind, MalformedLogError};
use crate::types::{Overlay, PowerLevel, StationType};

/// Minimum token count of a QSO: line (tag included)
const QSO_FIELDS: usize = 11;
/// Trailing transmitter id allowed by Cabrillo 3.0
const QSO_FIELDS_WITH_TX: usize = 12;

/// Header keywords understood by the processor
const KNOWN_KEYWORDS: &[&str] = &[
    "START-OF-LOG",
    "END-OF-LOG",
    "CALLSIGN",
    "CONTEST",
    "CATEGORY-OPERATOR",
    "CATEGORY-POWER",
    "CATEGORY-STATION",
    "CATEGORY-OVERLAY",
    "CATEGORY-ASSISTED",
    "CATEGORY-BAND",
    "CATEGORY-MODE",
    "CATEGORY-TRANSMITTER",
    "CATEGORY-TIME",
    "CERTIFICATE",
    "CLAIMED-SCORE",
    "CLUB",
    "CREATED-BY",
    "EMAIL",
    "GRID-LOCATOR",
    "LOCATION",
    "NAME",
    "ADDRESS",
    "ADDRESS-CITY",
    "ADDRESS-STATE-PROVINCE",
    "ADDRESS-POSTALCODE",
    "ADDRESS-COUNTRY",
    "OPERATORS",
    "OFFTIME",
    "SOAPBOX",
    "QSO",
];

/// Contest metadata from the header section of one log
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LogHeader {
    pub callsign: Option<String>,
    pub contest: Option<String>,
    pub email: Option<String>,
    pub category_operator: Option<String>,
    /// Raw CATEGORY-POWER value as claimed
    pub category_power: Option<String>,
    /// Raw CATEGORY-STATION value as claimed
    pub category_station: Option<String>,
    /// Raw CATEGORY-OVERLAY value as claimed
    pub category_overlay: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
    pub club: Option<String>,
    pub created_by: Option<String>,
    pub claimed_score: Option<String>,
    pub operators: Option<String>,
    pub soapbox: Vec<String>,
    pub address: Vec<String>,
}

impl LogHeader {
    pub fn power_level(&self) -> Option<PowerLevel> {
        self.category_power.as_deref().and_then(PowerLevel::from_header)
    }

    pub fn station_type(&self) -> Option<StationType> {
        self.category_station.as_deref().and_then(StationType::from_header)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.category_overlay.as_deref().and_then(Overlay::from_header)
    }
}

/// A single QSO line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QsoRecord {
    /// 1-based line number in the submitted text
    pub line: usize,
    pub freq_khz: u32,
    /// Mode token as logged (upper case)
    pub mode: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub sent_call: String,
    pub sent_rst: String,
    pub sent_qth: String,
    pub rcvd_call: String,
    pub rcvd_rst: String,
    pub rcvd_qth: String,
    /// Cabrillo 3.0 transmitter id (multi-transmitter logs)
    pub transmitter: Option<String>,
}

impl QsoRecord {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    pub fn band(&self) -> Option<Band> {
        freq_to_band(self.freq_khz)
    }

    pub fn mode_group(&self) -> Option<ModeGroup> {
        mode_group(&self.mode)
    }
}

/// Parsed Cabrillo file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedLog {
    pub header: LogHeader,
    /// QSOs in file order
    pub qsos: Vec<QsoRecord>,
    /// Non-fatal parse findings (unknown keywords, missing brackets)
    pub warnings: Vec<String>,
}

/// Parse Cabrillo text into a ParsedLog
pub fn parse_cabrillo(content: &str) -> Result<ParsedLog, MalformedLogError> {
    let mut log = ParsedLog::default();
    let mut saw_start = false;
    let mut saw_end = false;
    // Windows editors save a byte-order mark ahead of START-OF-LOG
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    for (index, raw_line) in content.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let (keyword, value) = split_keyword(line).ok_or_else(|| {
            let token = line.split_whitespace().next().unwrap_or(line);
            MalformedLogError::new(line_no, MalformedKind::UnknownKeyword(token.to_string()))
        })?;

        match keyword.as_str() {
            "START-OF-LOG" => saw_start = true,
            "END-OF-LOG" => saw_end = true,
            "QSO" => log.qsos.push(parse_qso_line(value, line_no)?),
            "CALLSIGN" => log.header.callsign = first_token_upper(value),
            "CONTEST" => log.header.contest = first_token_upper(value),
            "EMAIL" => log.header.email = non_empty(value),
            "CATEGORY-OPERATOR" => log.header.category_operator = first_token_upper(value),
            "CATEGORY-POWER" => log.header.category_power = first_token_upper(value),
            "CATEGORY-STATION" => log.header.category_station = first_token_upper(value),
            "CATEGORY-OVERLAY" => log.header.category_overlay = first_token_upper(value),
            "LOCATION" => log.header.location = first_token_upper(value),
            "NAME" => log.header.name = non_empty(value),
            "CLUB" => log.header.club = non_empty(value),
            "CREATED-BY" => log.header.created_by = non_empty(value),
            "CLAIMED-SCORE" => log.header.claimed_score = first_token_upper(value),
            "OPERATORS" => log.header.operators = non_empty(value).map(|v| v.to_uppercase()),
            "SOAPBOX" => log.header.soapbox.extend(non_empty(value)),
            "ADDRESS" => log.header.address.extend(non_empty(value)),
            k if k.starts_with("X-") => {}
            k if KNOWN_KEYWORDS.contains(&k) => {}
            other => log.warnings.push(format!(
                "Line {}: unknown header keyword '{}:' ignored",
                line_no, other
            )),
        }
    }

    if !saw_start {
        log.warnings.push("Missing START-OF-LOG line".to_string());
    }
    if !saw_end {
        log.warnings.push("Missing END-OF-LOG line".to_string());
    }

    log::debug!(
        "Parsed Cabrillo log {:?}: {} QSOs, {} warnings",
        log.header.callsign,
        log.qsos.len(),
        log.warnings.len()
    );

    Ok(log)
}

/// Split "KEYWORD: value" into (upper-cased keyword, value).
/// The keyword must be letters, digits and hyphens only.
fn split_keyword(line: &str) -> Option<(String, &str)> {
    let colon = line.find(':')?;
    let keyword = &line[..colon];
    if keyword.is_empty() || !keyword.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some((keyword.to_uppercase(), line[colon + 1..].trim()))
}

fn first_token_upper(value: &str) -> Option<String> {
    value.split_whitespace().next().map(|t| t.to_uppercase())
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Parse the fields that follow a QSO: tag
fn parse_qso_line(value: &str, line_no: usize) -> Result<QsoRecord, MalformedLogError> {
    let fields: Vec<String> = value.split_whitespace().map(|f| f.to_uppercase()).collect();
    // Count the QSO: tag itself so messages match the documented layout
    let token_count = fields.len() + 1;

    if token_count < QSO_FIELDS {
        return Err(MalformedLogError::new(line_no, MalformedKind::TooFewFields(token_count)));
    }
    if token_count > QSO_FIELDS_WITH_TX {
        return Err(MalformedLogError::new(line_no, MalformedKind::TooManyFields(token_count)));
    }

    let freq_khz = parse_frequency(&fields[0])
        .ok_or_else(|| MalformedLogError::new(line_no, MalformedKind::BadFrequency(fields[0].clone())))?;
    let date = parse_cabrillo_date(&fields[2])
        .ok_or_else(|| MalformedLogError::new(line_no, MalformedKind::BadDate(fields[2].clone())))?;
    let time = parse_cabrillo_time(&fields[3])
        .ok_or_else(|| MalformedLogError::new(line_no, MalformedKind::BadTime(fields[3].clone())))?;

    Ok(QsoRecord {
        line: line_no,
        freq_khz,
        mode: fields[1].clone(),
        date,
        time,
        sent_call: fields[4].clone(),
        sent_rst: fields[5].clone(),
        sent_qth: fields[6].clone(),
        rcvd_call: fields[7].clone(),
        rcvd_rst: fields[8].clone(),
        rcvd_qth: fields[9].clone(),
        transmitter: fields.get(10).cloned(),
    })
}

/// Parse a frequency in kHz. Fractional kHz ("7040.5") is truncated.
fn parse_frequency(field: &str) -> Option<u32> {
    let (whole, fraction) = match field.split_once('.') {
        Some((w, f)) => (w, f),
        None => (field, ""),
    };
    if whole.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    whole.parse().ok()
}
