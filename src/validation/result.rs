// Validation verdict and report

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Outcome of validating one log.
///
/// Errors are fatal, warnings are informational. The verdict is derived from
/// the error list and never stored separately.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub callsign: Option<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub qso_count: usize,
    /// QSO lines with at least one error
    pub invalid_qso_count: usize,
}

impl ValidationResult {
    pub fn new(callsign: Option<String>) -> Self {
        Self {
            callsign,
            ..Default::default()
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Plain-text report for the entrant or the problems folder
    pub fn to_report(&self) -> String {
        let mut report = String::new();
        report.push_str("LAQP Log Validation Report\n");
        report.push_str("==========================\n");
        report.push_str(&format!(
            "Callsign: {}\n",
            self.callsign.as_deref().unwrap_or("(missing)")
        ));
        report.push_str(&format!(
            "Status: {}\n",
            if self.is_valid() { "VALID" } else { "INVALID" }
        ));
        report.push_str(&format!(
            "QSOs: {} ({} with errors)\n",
            self.qso_count, self.invalid_qso_count
        ));

        if !self.errors.is_empty() {
            report.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for error in &self.errors {
                report.push_str(&format!("  - {}\n", error));
            }
        }

        if !self.warnings.is_empty() {
            report.push_str(&format!("\nWarnings ({}):\n", self.warnings.len()));
            for warning in &self.warnings {
                report.push_str(&format!("  - {}\n", warning));
            }
        }

        report
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 6)?;
        state.serialize_field("callsign", &self.callsign)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.serialize_field("qso_count", &self.qso_count)?;
        state.serialize_field("invalid_qso_count", &self.invalid_qso_count)?;
        state.end()
    }
}
