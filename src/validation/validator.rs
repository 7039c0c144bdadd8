// Log Validator
// Applies the LAQP submission rules to a parsed log
//
// Every check runs on every log; nothing short-circuits, so the entrant gets
// the complete list of problems in one report.

use std::collections::BTreeSet;

use crate::cabrillo::time_utils::format_timestamp;
use crate::cabrillo::{freq_to_band, is_valid_mode, LogHeader, ParsedLog, QsoRecord};
use crate::config::Contest;
use crate::reference::prefixes::is_valid_callsign;
use crate::reference::split_location;
use crate::types::{Overlay, PowerLevel, StationType};

use super::ValidationResult;

/// Which side of the exchange a location code came from
#[derive(Debug, Clone, Copy)]
enum Side {
    Sent,
    Received,
}

impl Side {
    fn as_str(&self) -> &'static str {
        match self {
            Side::Sent => "sent",
            Side::Received => "received",
        }
    }
}

pub struct LogValidator<'a> {
    contest: &'a Contest,
}

impl<'a> LogValidator<'a> {
    pub fn new(contest: &'a Contest) -> Self {
        Self { contest }
    }

    pub fn validate(&self, log: &ParsedLog) -> ValidationResult {
        let mut result = ValidationResult::new(log.header.callsign.clone());
        result.qso_count = log.qsos.len();

        for warning in &log.warnings {
            result.add_warning(warning.clone());
        }

        self.check_header(&log.header, &mut result);

        for qso in &log.qsos {
            let errors_before = result.errors.len();
            self.check_qso(qso, &mut result);
            if result.errors.len() > errors_before {
                result.invalid_qso_count += 1;
            }
        }

        self.check_station_consistency(log, &mut result);

        log::debug!(
            "Validated {:?}: {} errors, {} warnings",
            result.callsign,
            result.errors.len(),
            result.warnings.len()
        );

        result
    }

    fn check_header(&self, header: &LogHeader, result: &mut ValidationResult) {
        if header.callsign.is_none() {
            result.add_error("Missing required header CALLSIGN");
        }

        match header.category_power.as_deref() {
            None => result.add_error("Missing required header CATEGORY-POWER"),
            Some(power) if PowerLevel::from_header(power).is_none() => result.add_error(format!(
                "Invalid CATEGORY-POWER '{}' (expected QRP, LOW or HIGH)",
                power
            )),
            Some(_) => {}
        }

        match header.category_station.as_deref() {
            None => result.add_error("Missing required header CATEGORY-STATION"),
            Some(station) if !StationType::is_known_header_value(station) => {
                result.add_warning(format!("Unknown CATEGORY-STATION '{}'", station))
            }
            Some(_) => {}
        }

        if header.email.is_none() {
            result.add_warning("Missing EMAIL header");
        }
        if header.category_operator.is_none() {
            result.add_warning("Missing CATEGORY-OPERATOR header");
        }

        if let Some(overlay) = header.category_overlay.as_deref() {
            if Overlay::from_header(overlay).is_none() {
                result.add_warning(format!("Unknown CATEGORY-OVERLAY '{}' ignored", overlay));
            }
        }
    }

    fn check_qso(&self, qso: &QsoRecord, result: &mut ValidationResult) {
        let line = qso.line;
        let config = &self.contest.config;

        let timestamp = qso.timestamp();
        if !config.in_window(timestamp) {
            result.add_error(format!(
                "Line {}: QSO time {} is outside the contest period ({} to {})",
                line,
                format_timestamp(&timestamp),
                format_timestamp(&config.window_start),
                format_timestamp(&config.window_end)
            ));
        }

        if freq_to_band(qso.freq_khz).is_none() {
            result.add_error(format!(
                "Line {}: frequency {} kHz is not in a contest band",
                line, qso.freq_khz
            ));
        }

        if !is_valid_mode(&qso.mode) {
            result.add_error(format!("Line {}: unrecognized mode '{}'", line, qso.mode));
        }

        if !is_valid_callsign(&qso.sent_call) {
            result.add_error(format!("Line {}: invalid sent callsign '{}'", line, qso.sent_call));
        }
        if !is_valid_callsign(&qso.rcvd_call) {
            result.add_error(format!(
                "Line {}: invalid received callsign '{}'",
                line, qso.rcvd_call
            ));
        }

        self.check_location(&qso.sent_qth, &qso.sent_call, Side::Sent, line, result);
        self.check_location(&qso.rcvd_qth, &qso.rcvd_call, Side::Received, line, result);
    }

    fn check_location(
        &self,
        code: &str,
        call: &str,
        side: Side,
        line: usize,
        result: &mut ValidationResult,
    ) {
        let reference = &self.contest.reference;

        if code.contains('/') {
            let parts = split_location(code);
            if reference.is_parish_location(code) {
                result.add_warning(format!(
                    "Line {}: county line {} location '{}' will be split across {} parishes",
                    line,
                    side.as_str(),
                    code,
                    parts.len()
                ));
            } else {
                result.add_error(format!(
                    "Line {}: county line {} location '{}' must list parishes only",
                    line,
                    side.as_str(),
                    code
                ));
            }
            return;
        }

        if reference.classify(code, call).is_none() {
            result.add_error(format!(
                "Line {}: invalid {} location '{}'",
                line,
                side.as_str(),
                code
            ));
        }
    }

    /// A fixed station should send one parish; a rover more than one
    fn check_station_consistency(&self, log: &ParsedLog, result: &mut ValidationResult) {
        let reference = &self.contest.reference;
        let sent_parishes: BTreeSet<&str> = log
            .qsos
            .iter()
            .map(|q| q.sent_qth.as_str())
            .filter(|code| reference.is_parish_location(code))
            .collect();

        if sent_parishes.is_empty() {
            return;
        }

        match log.header.station_type() {
            Some(StationType::Fixed) if sent_parishes.len() > 1 => result.add_warning(format!(
                "CATEGORY-STATION is FIXED but QSOs were sent from {} parishes ({})",
                sent_parishes.len(),
                sent_parishes.iter().copied().collect::<Vec<_>>().join(", ")
            )),
            Some(StationType::Rover) if sent_parishes.len() == 1 => result.add_warning(format!(
                "CATEGORY-STATION is ROVER but all QSOs were sent from one parish ({})",
                sent_parishes.iter().copied().collect::<Vec<_>>().join(", ")
            )),
            _ => {}
        }
    }
}

/// Validate with a one-off validator
pub fn validate_log(log: &ParsedLog, contest: &Contest) -> ValidationResult {
    LogValidator::new(contest).validate(log)
}
