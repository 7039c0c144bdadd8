// Contest-wide statistics over finished score records
//
// Only non-duplicate QSOs are counted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cabrillo::{Band, ModeGroup};
use crate::categories::CategoryId;
use crate::reference::ReferenceData;
use crate::scoring::ScoreRecord;
use crate::types::{LocationClass, LocationType};

/// QSO activity for one parish
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParishActivity {
    pub code: String,
    pub name: String,
    /// QSOs made from the parish
    pub sent: usize,
    /// QSOs with stations in the parish
    pub received: usize,
}

impl ParishActivity {
    pub fn is_active(&self) -> bool {
        self.sent > 0 || self.received > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContestStatistics {
    pub total_logs: usize,
    pub logs_by_location: BTreeMap<LocationType, usize>,
    /// Base and overlay ids; a log with an overlay counts in both
    pub logs_by_category: BTreeMap<CategoryId, usize>,
    pub total_qsos: usize,
    pub qsos_by_mode: BTreeMap<ModeGroup, usize>,
    pub qsos_by_band: BTreeMap<Band, usize>,
    /// Every parish in reference order, active or not
    pub parish_activity: Vec<ParishActivity>,
    pub parishes_active: usize,
    pub parishes_operated: usize,
    pub parishes_worked: usize,
    pub inactive_parishes: Vec<String>,
}

pub fn compute_statistics(records: &[ScoreRecord], reference: &ReferenceData) -> ContestStatistics {
    let mut stats = ContestStatistics {
        total_logs: records.len(),
        ..Default::default()
    };

    let mut sent: BTreeMap<&str, usize> = BTreeMap::new();
    let mut received: BTreeMap<&str, usize> = BTreeMap::new();

    for record in records {
        *stats
            .logs_by_location
            .entry(record.classification.location_type)
            .or_insert(0) += 1;
        for id in record.categories.ids() {
            *stats.logs_by_category.entry(id).or_insert(0) += 1;
        }

        for scored in record.qsos.iter().filter(|q| !q.duplicate) {
            let qso = &scored.qso;
            stats.total_qsos += 1;
            *stats.qsos_by_mode.entry(qso.mode_group).or_insert(0) += 1;
            *stats.qsos_by_band.entry(qso.band).or_insert(0) += 1;

            if qso.sent_class == Some(LocationClass::Parish) {
                *sent.entry(qso.record.sent_qth.as_str()).or_insert(0) += 1;
            }
            if qso.rcvd_class == Some(LocationClass::Parish) {
                *received.entry(qso.record.rcvd_qth.as_str()).or_insert(0) += 1;
            }
        }
    }

    for code in reference.parish_codes() {
        let activity = ParishActivity {
            code: code.to_string(),
            name: reference.parish_name(code).unwrap_or(code).to_string(),
            sent: sent.get(code).copied().unwrap_or(0),
            received: received.get(code).copied().unwrap_or(0),
        };
        if activity.is_active() {
            stats.parishes_active += 1;
        } else {
            stats.inactive_parishes.push(activity.code.clone());
        }
        if activity.sent > 0 {
            stats.parishes_operated += 1;
        }
        if activity.received > 0 {
            stats.parishes_worked += 1;
        }
        stats.parish_activity.push(activity);
    }

    log::debug!(
        "Statistics: {} logs, {} QSOs, {}/{} parishes active",
        stats.total_logs,
        stats.total_qsos,
        stats.parishes_active,
        reference.parish_count()
    );

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cabrillo::parse_cabrillo;
    use crate::config::Contest;
    use crate::preparation::prepare_log;
    use crate::scoring::score_log;

    fn record(text: &str, contest: &Contest) -> ScoreRecord {
        score_log(&prepare_log(&parse_cabrillo(text).unwrap(), contest), contest)
    }

    #[test]
    fn test_statistics() {
        let contest = Contest::default();
        let records = vec![
            record(
                "CALLSIGN: W5ABC\nCATEGORY-POWER: LOW\nCATEGORY-STATION: FIXED\n\
                 QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
                 QSO: 7040 CW 2024-04-06 1403 W5ABC 599 EBR W5XYZ 599 ORLE\n\
                 QSO: 7040 CW 2024-04-06 1404 W5ABC 599 EBR W5XYZ 599 ORLE\n",
                &contest,
            ),
            record(
                "CALLSIGN: K1XYZ\nCATEGORY-POWER: QRP\nCATEGORY-STATION: FIXED\nCATEGORY-OVERLAY: WIRES\n\
                 QSO: 14250 PH 2024-04-06 1500 K1XYZ 59 MA W5ABC 59 EBR\n",
                &contest,
            ),
        ];

        let stats = compute_statistics(&records, &contest.reference);
        assert_eq!(stats.total_logs, 2);
        assert_eq!(stats.logs_by_location.get(&LocationType::LaFixed), Some(&1));
        assert_eq!(stats.logs_by_location.get(&LocationType::NonLa), Some(&1));
        assert_eq!(stats.logs_by_category.len(), 3);

        // Third W5ABC QSO is a duplicate
        assert_eq!(stats.total_qsos, 3);
        assert_eq!(stats.qsos_by_mode.get(&ModeGroup::Cw), Some(&2));
        assert_eq!(stats.qsos_by_mode.get(&ModeGroup::Phone), Some(&1));
        assert_eq!(stats.qsos_by_band.get(&Band::B20), Some(&1));

        let ebr = stats.parish_activity.iter().find(|p| p.code == "EBR").unwrap();
        assert_eq!((ebr.sent, ebr.received), (2, 1));
        assert_eq!(stats.parishes_active, 2);
        assert_eq!(stats.parishes_operated, 1);
        assert_eq!(stats.parishes_worked, 2);
        assert_eq!(stats.parish_activity.len(), 64);
        assert_eq!(stats.inactive_parishes.len(), 62);
        assert!(!stats.inactive_parishes.contains(&"ORLE".to_string()));
    }

    #[test]
    fn test_empty_batch() {
        let contest = Contest::default();
        let stats = compute_statistics(&[], &contest.reference);
        assert_eq!(stats.total_logs, 0);
        assert_eq!(stats.parishes_active, 0);
        assert_eq!(stats.inactive_parishes.len(), 64);
    }
}
