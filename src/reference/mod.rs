// Reference data module - location codes accepted in the LAQP exchange
//
// The parish, state and province sets are passed explicitly to every stage
// as a ReferenceData value. The built-in tables cover the current rules;
// a run can also load the committee's text files (one code per line) so a
// rules change does not need a rebuild.

pub mod parishes;
pub mod prefixes;
pub mod states;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::ConfigError;
use crate::types::LocationClass;
use parishes::LA_PARISHES;
use prefixes::is_dx_callsign;
use states::{get_state_or_province, Country, CANADIAN_PROVINCES, US_STATES_AND_DC};

/// Code DX stations may send in place of a country abbreviation
pub const DX_INDICATOR: &str = "DX";

/// Location code tables for one contest run
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    /// Parish code -> display name
    parishes: BTreeMap<String, String>,
    states: BTreeSet<String>,
    provinces: BTreeSet<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// Reference data from the compiled-in tables
    pub fn builtin() -> Self {
        Self {
            parishes: LA_PARISHES
                .iter()
                .map(|p| (p.code.to_string(), p.name.to_string()))
                .collect(),
            states: US_STATES_AND_DC.iter().map(|s| s.code.to_string()).collect(),
            provinces: CANADIAN_PROVINCES.iter().map(|p| p.code.to_string()).collect(),
        }
    }

    /// Build from code lists. The state/province list is split using the
    /// known Canadian province codes; everything else counts as a state.
    pub fn from_codes<P, S>(parish_codes: P, state_province_codes: S) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        let parishes = parish_codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .map(|code| {
                let name = parishes::get_parish(&code)
                    .map(|p| p.name.to_string())
                    .unwrap_or_else(|| code.clone());
                (code, name)
            })
            .collect();

        let mut states = BTreeSet::new();
        let mut provinces = BTreeSet::new();
        for code in state_province_codes {
            let code = code.as_ref().trim().to_uppercase();
            if code.is_empty() {
                continue;
            }
            if get_state_or_province(&code).map(|s| s.country) == Some(Country::Canada) {
                provinces.insert(code);
            } else {
                states.insert(code);
            }
        }

        Self { parishes, states, provinces }
    }

    /// Load `la_parishes.txt` and `wve_abbrevs.txt` style files
    pub fn from_files(parish_file: &Path, state_province_file: &Path) -> Result<Self, ConfigError> {
        let parishes = read_code_file(parish_file)?;
        let states_provinces = read_code_file(state_province_file)?;
        let data = Self::from_codes(parishes, states_provinces);
        log::info!(
            "Loaded reference data: {} parishes, {} states, {} provinces",
            data.parishes.len(),
            data.states.len(),
            data.provinces.len()
        );
        Ok(data)
    }

    pub fn is_parish(&self, code: &str) -> bool {
        self.parishes.contains_key(code)
    }

    pub fn is_state(&self, code: &str) -> bool {
        self.states.contains(code)
    }

    pub fn is_province(&self, code: &str) -> bool {
        self.provinces.contains(code)
    }

    pub fn parish_name(&self, code: &str) -> Option<&str> {
        self.parishes.get(code).map(String::as_str)
    }

    /// Parish codes in alphabetical order
    pub fn parish_codes(&self) -> impl Iterator<Item = &str> {
        self.parishes.keys().map(String::as_str)
    }

    pub fn parish_count(&self) -> usize {
        self.parishes.len()
    }

    /// True for a parish or a county line made only of parishes (`EBR/WBR`)
    pub fn is_parish_location(&self, code: &str) -> bool {
        let parts = split_location(code);
        !parts.is_empty() && parts.iter().all(|part| self.is_parish(part))
    }

    /// Resolve one location code as sent by `call`.
    ///
    /// Parishes are checked first. A DX callsign turns any other code into a
    /// DX location, so codes that collide with a state or province
    /// (`ON`, `PA`, `CT`...) are not miscounted when a DX station sends them.
    /// All-digit codes never resolve.
    pub fn classify(&self, code: &str, call: &str) -> Option<LocationClass> {
        if code.is_empty() || code.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if self.is_parish(code) {
            Some(LocationClass::Parish)
        } else if is_dx_callsign(call) {
            Some(LocationClass::Dx)
        } else if self.is_state(code) {
            Some(LocationClass::State)
        } else if self.is_province(code) {
            Some(LocationClass::Province)
        } else if code == DX_INDICATOR {
            Some(LocationClass::Dx)
        } else {
            None
        }
    }
}

/// Split a county-line code (`EBR/WBR`) into its parts. Single codes
/// come back as a one-element list.
pub fn split_location(code: &str) -> Vec<&str> {
    code.split('/').filter(|part| !part.is_empty()).collect()
}

fn read_code_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let codes: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .collect();
    if codes.is_empty() {
        return Err(ConfigError::EmptyReference(path.to_path_buf()));
    }
    Ok(codes)
}
