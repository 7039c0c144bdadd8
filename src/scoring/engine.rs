// Scoring Engine
//
//   final score = QSO points x multipliers + bonuses
//
// QSO points: phone 2, CW/digital 4. A repeat of a (sent call, received
// call, band, mode group) contact scores nothing and adds no multiplier;
// the first one in file order is the one that counts. Records expanded
// from the same county-line line are one contact and never repeat each other.
//
// Multipliers are counted per band and mode group. Stations outside
// Louisiana count LA parishes only; LA stations also count states,
// provinces and DX.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use crate::categories::CategoryAssignment;
use crate::config::Contest;
use crate::preparation::{PreparedLog, PreparedQso};
use crate::reference::prefixes::normalize_callsign;
use crate::types::{LocationClass, LocationType};

use super::record::{
    Bonus, BonusSource, DuplicateKey, MultiplierKey, ScoreBreakdown, ScoreRecord, ScoredQso,
};

pub struct ScoringEngine<'a> {
    contest: &'a Contest,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(contest: &'a Contest) -> Self {
        Self { contest }
    }

    pub fn score(&self, log: &PreparedLog) -> ScoreRecord {
        let config = &self.contest.config;
        let location_type = log.classification.location_type;

        // Duplicate key -> line of the first occurrence
        let mut seen: HashMap<DuplicateKey, usize> = HashMap::new();
        let mut multipliers = BTreeSet::new();
        let mut breakdown = ScoreBreakdown::default();
        let mut qso_points: u64 = 0;
        let mut scored = Vec::with_capacity(log.qsos.len());

        for qso in &log.qsos {
            let duplicate = match seen.entry(DuplicateKey::for_qso(qso)) {
                Entry::Occupied(first) => *first.get() != qso.line(),
                Entry::Vacant(slot) => {
                    slot.insert(qso.line());
                    false
                }
            };

            if qso.sent_class == Some(LocationClass::Parish) {
                breakdown.parishes_activated.insert(qso.record.sent_qth.clone());
            }

            if duplicate {
                log::debug!("Line {}: duplicate of an earlier contact", qso.line());
                scored.push(ScoredQso {
                    qso: qso.clone(),
                    points: 0,
                    duplicate: true,
                    new_multiplier: false,
                });
                continue;
            }

            let points = config.points_for(qso.mode_group);
            qso_points += u64::from(points);
            record_worked(&mut breakdown, qso);

            let new_multiplier = match counted_location(location_type, qso) {
                Some(class) => multipliers.insert(MultiplierKey {
                    band: qso.band,
                    mode_group: qso.mode_group,
                    class,
                    location: qso.location_key().to_string(),
                }),
                None => false,
            };

            scored.push(ScoredQso {
                qso: qso.clone(),
                points,
                duplicate: false,
                new_multiplier,
            });
        }

        breakdown.bands_worked = breakdown.qsos_by_band.keys().copied().collect();
        let bonuses = self.bonuses(log, &breakdown);

        let multiplier_count = multipliers.len() as u64;
        let bonus_total: u64 = bonuses.iter().map(|b| b.points).sum();
        let final_score = qso_points * multiplier_count + bonus_total;

        log::debug!(
            "Scored {}: {} points x {} multipliers + {} bonus = {}",
            log.callsign(),
            qso_points,
            multiplier_count,
            bonus_total,
            final_score
        );

        ScoreRecord {
            callsign: log.callsign().to_string(),
            classification: log.classification.clone(),
            categories: CategoryAssignment::for_classification(&log.classification),
            qso_points,
            multipliers,
            bonuses,
            final_score,
            qsos: scored,
            breakdown,
        }
    }

    fn bonuses(&self, log: &PreparedLog, breakdown: &ScoreBreakdown) -> Vec<Bonus> {
        let config = &self.contest.config;
        let mut bonuses = Vec::new();

        let club_key = normalize_callsign(&config.club_call);
        if log.qsos.iter().any(|q| q.rcvd_call_key == club_key) {
            bonuses.push(Bonus {
                source: BonusSource::ClubStation {
                    call: config.club_call.clone(),
                },
                points: u64::from(config.club_bonus),
            });
        }

        if log.classification.location_type == LocationType::LaRover {
            let parishes = breakdown.parishes_activated.len();
            if parishes > 0 {
                bonuses.push(Bonus {
                    source: BonusSource::RoverActivation { parishes },
                    points: parishes as u64 * u64::from(config.rover_parish_bonus),
                });
            }
        }

        bonuses
    }
}

/// Score with a one-off engine
pub fn score_log(log: &PreparedLog, contest: &Contest) -> ScoreRecord {
    ScoringEngine::new(contest).score(log)
}

/// Location class that earns a multiplier for this kind of log, if any
fn counted_location(location_type: LocationType, qso: &PreparedQso) -> Option<LocationClass> {
    let class = qso.rcvd_class?;
    if location_type.is_louisiana() || class == LocationClass::Parish {
        Some(class)
    } else {
        None
    }
}

fn record_worked(breakdown: &mut ScoreBreakdown, qso: &PreparedQso) {
    *breakdown.qsos_by_band.entry(qso.band).or_insert(0) += 1;
    *breakdown.qsos_by_mode.entry(qso.mode_group).or_insert(0) += 1;

    let code = qso.location_key().to_string();
    match qso.rcvd_class {
        Some(LocationClass::Parish) => breakdown.parishes_worked.insert(code),
        Some(LocationClass::State) => breakdown.states_worked.insert(code),
        Some(LocationClass::Province) => breakdown.provinces_worked.insert(code),
        Some(LocationClass::Dx) => breakdown.dx_worked.insert(code),
        None => false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cabrillo::parse_cabrillo;
    use crate::preparation::prepare_log;

    fn score_text(text: &str) -> ScoreRecord {
        let contest = Contest::default();
        let parsed = parse_cabrillo(text).unwrap();
        score_log(&prepare_log(&parsed, &contest), &contest)
    }

    fn la_log(station: &str, qsos: &str) -> String {
        format!(
            "START-OF-LOG: 3.0\nCALLSIGN: W5ABC\nCATEGORY-POWER: LOW\nCATEGORY-STATION: {}\n{}END-OF-LOG:\n",
            station, qsos
        )
    }

    #[test]
    fn test_zero_qsos_scores_zero() {
        let record = score_text(&la_log("FIXED", ""));
        assert_eq!(record.final_score, 0);
        assert_eq!(record.multiplier_count(), 0);
    }

    #[test]
    fn test_points_and_multipliers() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 7200 PH 2024-04-06 1403 W5ABC 59 EBR K2XYZ 59 MA\n\
             QSO: 7040 CW 2024-04-06 1404 W5ABC 599 EBR K3XYZ 599 MA\n\
             QSO: 14025 CW 2024-04-06 1405 W5ABC 599 EBR VE3ABC 599 ON\n",
        ));
        // 4 + 2 + 4 + 4 points; MA on 40 CW, MA on 40 phone, ON on 20 CW
        assert_eq!(record.qso_points, 14);
        assert_eq!(record.multiplier_count(), 3);
        assert_eq!(record.final_score, 42);
        assert!(record.qsos[0].new_multiplier);
        assert!(record.qsos[1].new_multiplier);
        assert!(!record.qsos[2].new_multiplier);
        assert_eq!(record.breakdown.states_worked.len(), 1);
        assert_eq!(record.breakdown.provinces_worked.len(), 1);
    }

    #[test]
    fn test_cw_and_digital_are_separate_multiplier_modes() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 14025 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 14074 FT8 2024-04-06 1403 W5ABC -10 EBR K2XYZ -12 MA\n",
        ));
        assert_eq!(record.qso_points, 8);
        assert_eq!(record.multiplier_count(), 2);
    }

    #[test]
    fn test_non_la_counts_parishes_only() {
        let record = score_text(
            "CALLSIGN: K1XYZ\nCATEGORY-POWER: LOW\nCATEGORY-STATION: FIXED\n\
             QSO: 7040 CW 2024-04-06 1402 K1XYZ 599 MA W5ABC 599 EBR\n\
             QSO: 7040 CW 2024-04-06 1403 K1XYZ 599 MA K2XYZ 599 NY\n",
        );
        assert_eq!(record.qso_points, 8);
        assert_eq!(record.multiplier_count(), 1);
        assert_eq!(record.final_score, 8);
    }

    #[test]
    fn test_duplicate_scores_nothing() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 7041 CW 2024-04-06 1500 W5ABC 599 EBR K1XYZ/P 599 MA\n",
        ));
        assert_eq!(record.duplicate_count(), 1);
        assert!(record.qsos[1].duplicate);
        assert_eq!(record.qsos[1].points, 0);
        assert!(!record.qsos[1].new_multiplier);
        assert_eq!(record.qso_points, 4);
        assert_eq!(record.final_score, 4);
    }

    #[test]
    fn test_county_line_records_are_not_duplicates() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K5XYZ 599 ORLE/JEFF\n",
        ));
        assert_eq!(record.qsos.len(), 2);
        assert_eq!(record.duplicate_count(), 0);
        assert_eq!(record.qso_points, 8);
        assert_eq!(record.multiplier_count(), 2);
        assert_eq!(record.final_score, 16);
    }

    #[test]
    fn test_club_bonus_after_multiplication() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR N5LCC 599 EBR\n\
             QSO: 14025 CW 2024-04-06 1403 W5ABC 599 EBR K5XYZ 599 EBR\n",
        ));
        assert_eq!(record.multiplier_count(), 2);
        assert_eq!(record.bonus_total(), 100);
        assert_eq!(record.final_score, 8 * 2 + 100);
    }

    #[test]
    fn test_club_bonus_paid_once() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR N5LCC 599 EBR\n\
             QSO: 14025 CW 2024-04-06 1403 W5ABC 599 EBR N5LCC/M 599 EBR\n\
             QSO: 3850 PH 2024-04-06 1404 W5ABC 59 EBR N5LCC 59 EBR\n",
        ));
        assert_eq!(record.duplicate_count(), 0);
        assert_eq!(record.qso_points, 10);
        assert_eq!(record.multiplier_count(), 3);
        assert_eq!(record.bonus_total(), 100);
        assert_eq!(record.bonuses.len(), 1);
        assert_eq!(record.final_score, 10 * 3 + 100);
    }

    #[test]
    fn test_rover_worked_twice_keeps_first_location() {
        // Same station, same band and mode, new parish: still a duplicate,
        // so only the first parish it sent can become a multiplier
        let first_ebr = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K5ROV 599 EBR\n\
             QSO: 7040 CW 2024-04-06 1602 W5ABC 599 EBR K5ROV 599 WBR\n\
             QSO: 7040 CW 2024-04-06 1702 W5ABC 599 EBR K5XYZ 599 EBR\n",
        ));
        assert!(first_ebr.qsos[1].duplicate);
        assert_eq!(first_ebr.multiplier_count(), 1);
        assert_eq!(first_ebr.final_score, 8);

        let first_wbr = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K5ROV 599 WBR\n\
             QSO: 7040 CW 2024-04-06 1602 W5ABC 599 EBR K5ROV 599 EBR\n\
             QSO: 7040 CW 2024-04-06 1702 W5ABC 599 EBR K5XYZ 599 EBR\n",
        ));
        assert!(first_wbr.qsos[1].duplicate);
        assert_eq!(first_wbr.multiplier_count(), 2);
        assert_eq!(first_wbr.final_score, 16);
    }

    #[test]
    fn test_rover_bonus_per_parish() {
        let record = score_text(&la_log(
            "ROVER",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 7040 CW 2024-04-06 1602 W5ABC 599 WBR K2XYZ 599 MA\n\
             QSO: 7040 CW 2024-04-06 1802 W5ABC 599 IBVL K3XYZ 599 MA\n",
        ));
        assert_eq!(record.breakdown.parishes_activated.len(), 3);
        assert_eq!(record.qso_points, 12);
        assert_eq!(record.multiplier_count(), 1);
        assert_eq!(record.final_score, 12 + 150);
        assert_eq!(
            record.bonuses,
            vec![Bonus {
                source: BonusSource::RoverActivation { parishes: 3 },
                points: 150
            }]
        );
    }

    #[test]
    fn test_fixed_station_gets_no_rover_bonus() {
        let record = score_text(&la_log(
            "FIXED",
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 7040 CW 2024-04-06 1602 W5ABC 599 WBR K2XYZ 599 MA\n",
        ));
        assert!(record.bonuses.is_empty());
    }
}
