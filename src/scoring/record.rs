// Score record types

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::cabrillo::{Band, ModeGroup};
use crate::categories::CategoryAssignment;
use crate::preparation::{LogClassification, PreparedQso};
use crate::types::LocationClass;

/// Identity of a contact within one log
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DuplicateKey {
    pub sent_call: String,
    pub rcvd_call: String,
    pub band: Band,
    pub mode_group: ModeGroup,
}

impl DuplicateKey {
    pub fn for_qso(qso: &PreparedQso) -> Self {
        Self {
            sent_call: qso.sent_call_key.clone(),
            rcvd_call: qso.rcvd_call_key.clone(),
            band: qso.band,
            mode_group: qso.mode_group,
        }
    }
}

/// One multiplier: a location worked on a band in a mode group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MultiplierKey {
    pub band: Band,
    pub mode_group: ModeGroup,
    pub class: LocationClass,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BonusSource {
    /// Contact with the club station
    ClubStation { call: String },
    /// LA rover activating parishes
    RoverActivation { parishes: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bonus {
    pub source: BonusSource,
    pub points: u64,
}

/// A prepared QSO with its scoring outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredQso {
    pub qso: PreparedQso,
    pub points: u32,
    pub duplicate: bool,
    pub new_multiplier: bool,
}

/// Per-log totals for the individual results report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub parishes_worked: BTreeSet<String>,
    pub states_worked: BTreeSet<String>,
    pub provinces_worked: BTreeSet<String>,
    pub dx_worked: BTreeSet<String>,
    /// Parishes the station sent from
    pub parishes_activated: BTreeSet<String>,
    pub qsos_by_band: BTreeMap<Band, usize>,
    pub qsos_by_mode: BTreeMap<ModeGroup, usize>,
    pub bands_worked: Vec<Band>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub callsign: String,
    pub classification: LogClassification,
    pub categories: CategoryAssignment,
    pub qso_points: u64,
    pub multipliers: BTreeSet<MultiplierKey>,
    pub bonuses: Vec<Bonus>,
    pub final_score: u64,
    pub qsos: Vec<ScoredQso>,
    pub breakdown: ScoreBreakdown,
}

impl ScoreRecord {
    pub fn multiplier_count(&self) -> usize {
        self.multipliers.len()
    }

    pub fn bonus_total(&self) -> u64 {
        self.bonuses.iter().map(|b| b.points).sum()
    }

    /// Non-duplicate QSOs (after county-line expansion)
    pub fn valid_qso_count(&self) -> usize {
        self.qsos.iter().filter(|q| !q.duplicate).count()
    }

    pub fn duplicate_count(&self) -> usize {
        self.qsos.iter().filter(|q| q.duplicate).count()
    }
}
