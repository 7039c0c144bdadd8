// Shared classification types
//
// These are the typed forms of the header claims (power, station, overlay)
// and the classifications derived during preparation (location type, mode
// category, location class of a single exchange).

use serde::{Deserialize, Serialize};

/// Declared transmitter power (CATEGORY-POWER)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PowerLevel {
    /// 5W or less
    Qrp,
    /// 100W or less
    Low,
    /// 1500W or less
    High,
}

impl PowerLevel {
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "QRP" => Some(PowerLevel::Qrp),
            "LOW" => Some(PowerLevel::Low),
            "HIGH" => Some(PowerLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerLevel::Qrp => "QRP",
            PowerLevel::Low => "LOW",
            PowerLevel::High => "HIGH",
        }
    }
}

/// Declared station type (CATEGORY-STATION), collapsed to fixed/rover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationType {
    Fixed,
    Rover,
}

impl StationType {
    /// FIXED and PORTABLE are fixed; ROVER and MOBILE are rovers.
    /// Other Cabrillo values (HQ, SCHOOL, ...) carry no fixed/rover claim.
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "FIXED" | "PORTABLE" => Some(StationType::Fixed),
            "ROVER" | "MOBILE" => Some(StationType::Rover),
            _ => None,
        }
    }

    /// Values accepted on the CATEGORY-STATION line without a warning
    pub fn is_known_header_value(value: &str) -> bool {
        matches!(
            value.trim().to_uppercase().as_str(),
            "FIXED" | "PORTABLE" | "ROVER" | "MOBILE" | "DISTRIBUTED" | "EXPEDITION" | "HQ" | "SCHOOL"
        )
    }
}

/// Overlay award categories (CATEGORY-OVERLAY)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Overlay {
    #[serde(rename = "WIRES")]
    Wires,
    #[serde(rename = "TB-WIRES")]
    TribanderWires,
    #[serde(rename = "POTA")]
    Pota,
}

impl Overlay {
    pub fn from_header(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "WIRES" => Some(Overlay::Wires),
            "TB-WIRES" => Some(Overlay::TribanderWires),
            "POTA" => Some(Overlay::Pota),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Overlay::Wires => "WIRES",
            Overlay::TribanderWires => "TB-WIRES",
            Overlay::Pota => "POTA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Overlay::Wires => "Wires Only",
            Overlay::TribanderWires => "Tribander + Wires",
            Overlay::Pota => "Parks on the Air",
        }
    }
}

/// Where the logging station operated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationType {
    /// Outside the US and Canada
    #[serde(rename = "DX")]
    Dx,
    /// US or Canada, but not Louisiana
    #[serde(rename = "NON-LA")]
    NonLa,
    #[serde(rename = "LA-FIXED")]
    LaFixed,
    #[serde(rename = "LA-ROVER")]
    LaRover,
}

impl LocationType {
    pub fn is_louisiana(&self) -> bool {
        matches!(self, LocationType::LaFixed | LocationType::LaRover)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Dx => "DX",
            LocationType::NonLa => "NON-LA",
            LocationType::LaFixed => "LA-FIXED",
            LocationType::LaRover => "LA-ROVER",
        }
    }
}

/// Which mode groups appear in a log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModeCategory {
    PhoneOnly,
    CwDigitalOnly,
    Mixed,
}

/// Resolved class of a single location code in an exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocationClass {
    Parish,
    State,
    Province,
    Dx,
}
