// Cabrillo Mode Registry
// Cabrillo 3.0 defines CW, PH, FM, RY and DG. Submitted logs also carry the
// long-form names produced by various loggers, so those are accepted too.

use serde::{Deserialize, Serialize};

/// Mode group used for scoring and multiplier accounting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModeGroup {
    Phone,
    #[serde(rename = "CW")]
    Cw,
    Digital,
}

impl ModeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeGroup::Phone => "PHONE",
            ModeGroup::Cw => "CW",
            ModeGroup::Digital => "DIGITAL",
        }
    }

    /// CW and digital are scored together by the contest rules
    pub fn is_cw_or_digital(&self) -> bool {
        matches!(self, ModeGroup::Cw | ModeGroup::Digital)
    }
}

impl std::fmt::Display for ModeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const PHONE_MODES: &[&str] = &["PH", "SSB", "LSB", "USB", "FM", "AM"];
const CW_MODES: &[&str] = &["CW"];
const DIGITAL_MODES: &[&str] = &["RY", "RTTY", "DG", "DIG", "FT8", "FT4", "PSK", "PSK31"];

/// Normalize a mode token to upper case
pub fn normalize_mode(mode: &str) -> String {
    mode.trim().to_uppercase()
}

/// Collapse a Cabrillo mode token to its group; None for unrecognized tokens
pub fn mode_group(mode: &str) -> Option<ModeGroup> {
    let mode_upper = normalize_mode(mode);
    let mode_upper = mode_upper.as_str();

    if CW_MODES.contains(&mode_upper) {
        Some(ModeGroup::Cw)
    } else if PHONE_MODES.contains(&mode_upper) {
        Some(ModeGroup::Phone)
    } else if DIGITAL_MODES.contains(&mode_upper) {
        Some(ModeGroup::Digital)
    } else {
        None
    }
}

/// Check if a mode token is recognized
pub fn is_valid_mode(mode: &str) -> bool {
    mode_group(mode).is_some()
}
