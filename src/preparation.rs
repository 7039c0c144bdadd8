// Log Preparation
// Turns a validated ParsedLog into the normalized form the scorer consumes
//
// - every QSO gets a resolved band and mode group
// - callsigns get a normalized key (display text is kept as logged)
// - county-line codes (EBR/WBR) are expanded into one record per parish
// - the log is classified by location, mode, power and overlay
//
// Nothing here re-validates. Input that slipped past validation is coerced
// where possible and noted in the preparation warnings.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::cabrillo::{freq_to_band, mode_group, nearest_band, Band, LogHeader, ModeGroup, ParsedLog, QsoRecord};
use crate::config::Contest;
use crate::reference::prefixes::{callsign_country, normalize_callsign, CallsignCountry};
use crate::reference::{split_location, ReferenceData};
use crate::types::{LocationClass, LocationType, ModeCategory, Overlay, PowerLevel, StationType};

/// One scoring unit. A county-line QSO becomes several of these, all
/// sharing the source line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreparedQso {
    /// The QSO with single location codes on both sides
    pub record: QsoRecord,
    pub band: Band,
    pub mode_group: ModeGroup,
    pub sent_call_key: String,
    pub rcvd_call_key: String,
    /// None only for codes that never passed validation
    pub sent_class: Option<LocationClass>,
    pub rcvd_class: Option<LocationClass>,
}

impl PreparedQso {
    pub fn line(&self) -> usize {
        self.record.line
    }

    /// Location code that can count as a multiplier
    pub fn location_key(&self) -> &str {
        &self.record.rcvd_qth
    }
}

/// Derived classification of the logging station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogClassification {
    pub callsign: String,
    pub location_type: LocationType,
    /// Explicit or inferred; None for logs from outside Louisiana
    pub station_type: Option<StationType>,
    pub mode_category: ModeCategory,
    pub power: PowerLevel,
    pub overlay: Option<Overlay>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreparedLog {
    pub header: LogHeader,
    /// Expanded QSOs in file order
    pub qsos: Vec<PreparedQso>,
    pub classification: LogClassification,
    pub warnings: Vec<String>,
    /// QSO count before county-line expansion
    pub source_qso_count: usize,
}

impl PreparedLog {
    pub fn callsign(&self) -> &str {
        &self.classification.callsign
    }

    /// The expanded log as a ParsedLog, e.g. to write it back out or to
    /// prepare it again
    pub fn to_parsed(&self) -> ParsedLog {
        ParsedLog {
            header: self.header.clone(),
            qsos: self.qsos.iter().map(|q| q.record.clone()).collect(),
            warnings: Vec::new(),
        }
    }
}

pub struct LogPreparer<'a> {
    contest: &'a Contest,
}

impl<'a> LogPreparer<'a> {
    pub fn new(contest: &'a Contest) -> Self {
        Self { contest }
    }

    pub fn prepare(&self, log: &ParsedLog) -> PreparedLog {
        let mut header = log.header.clone();
        let mut warnings = Vec::new();

        let mut qsos = Vec::with_capacity(log.qsos.len());
        for record in &log.qsos {
            self.expand_qso(record, &mut qsos, &mut warnings);
        }

        let callsign = header
            .callsign
            .clone()
            .or_else(|| log.qsos.first().map(|q| q.sent_call.clone()))
            .unwrap_or_default();

        let location_type = self.location_type(&header, &callsign, log, &mut warnings);

        let station_type = if location_type.is_louisiana() {
            Some(match location_type {
                LocationType::LaRover => StationType::Rover,
                _ => StationType::Fixed,
            })
        } else {
            None
        };
        if header.category_station.is_none() {
            if let Some(inferred) = station_type {
                let value = match inferred {
                    StationType::Fixed => "FIXED",
                    StationType::Rover => "ROVER",
                };
                warnings.push(format!("CATEGORY-STATION inferred as {}", value));
                header.category_station = Some(value.to_string());
            }
        }

        let power = header.power_level().unwrap_or_else(|| {
            warnings.push("CATEGORY-POWER missing or unrecognized, assuming HIGH".to_string());
            PowerLevel::High
        });

        let classification = LogClassification {
            callsign,
            location_type,
            station_type,
            mode_category: mode_category(&qsos),
            power,
            overlay: header.overlay(),
        };

        log::debug!(
            "Prepared {}: {} QSOs from {} lines, {} ({:?})",
            classification.callsign,
            qsos.len(),
            log.qsos.len(),
            classification.location_type.as_str(),
            classification.mode_category
        );

        PreparedLog {
            header,
            qsos,
            classification,
            warnings,
            source_qso_count: log.qsos.len(),
        }
    }

    /// Expand one source QSO into prepared records (one per parish pair)
    fn expand_qso(&self, record: &QsoRecord, out: &mut Vec<PreparedQso>, warnings: &mut Vec<String>) {
        let reference = &self.contest.reference;

        let Some(group) = mode_group(&record.mode) else {
            warnings.push(format!(
                "Line {}: unrecognized mode '{}', QSO skipped",
                record.line, record.mode
            ));
            return;
        };

        let band = match freq_to_band(record.freq_khz) {
            Some(band) => band,
            None => {
                let (band, distance) = nearest_band(record.freq_khz);
                log::warn!(
                    "Line {}: {} kHz is outside all bands, using {} ({} kHz away)",
                    record.line,
                    record.freq_khz,
                    band,
                    distance
                );
                warnings.push(format!(
                    "Line {}: frequency {} kHz coerced to {}",
                    record.line, record.freq_khz, band
                ));
                band
            }
        };

        let sent_parts = expandable_parts(&record.sent_qth, reference);
        let rcvd_parts = expandable_parts(&record.rcvd_qth, reference);
        let sent_call_key = normalize_callsign(&record.sent_call);
        let rcvd_call_key = normalize_callsign(&record.rcvd_call);

        for sent in &sent_parts {
            for rcvd in &rcvd_parts {
                let mut expanded = record.clone();
                expanded.sent_qth = sent.to_string();
                expanded.rcvd_qth = rcvd.to_string();
                out.push(PreparedQso {
                    sent_class: reference.classify(sent, &record.sent_call),
                    rcvd_class: reference.classify(rcvd, &record.rcvd_call),
                    record: expanded,
                    band,
                    mode_group: group,
                    sent_call_key: sent_call_key.clone(),
                    rcvd_call_key: rcvd_call_key.clone(),
                });
            }
        }
    }

    fn location_type(
        &self,
        header: &LogHeader,
        callsign: &str,
        log: &ParsedLog,
        warnings: &mut Vec<String>,
    ) -> LocationType {
        let reference = &self.contest.reference;

        if callsign_country(callsign) == CallsignCountry::Dx {
            return LocationType::Dx;
        }

        let own_location = header
            .location
            .as_deref()
            .filter(|code| reference.is_state(code) || reference.is_province(code))
            .or_else(|| log.qsos.first().map(|q| q.sent_qth.as_str()));

        let in_louisiana = match own_location {
            Some("LA") => true,
            Some(code) => reference.is_parish_location(code),
            None => false,
        };
        if !in_louisiana {
            return LocationType::NonLa;
        }

        match header.station_type() {
            Some(StationType::Fixed) => LocationType::LaFixed,
            Some(StationType::Rover) => LocationType::LaRover,
            None => {
                let locations = sent_locations_by_line(log, reference);
                if locations.len() > 1 {
                    warnings.push(format!(
                        "No fixed/rover claim; treating as rover ({} sent parishes)",
                        locations.len()
                    ));
                    LocationType::LaRover
                } else {
                    LocationType::LaFixed
                }
            }
        }
    }
}

/// Prepare with a one-off preparer
pub fn prepare_log(log: &ParsedLog, contest: &Contest) -> PreparedLog {
    LogPreparer::new(contest).prepare(log)
}

/// County lines expand; anything else (including a malformed slash code)
/// stays as a single code.
fn expandable_parts<'c>(code: &'c str, reference: &ReferenceData) -> Vec<&'c str> {
    if code.contains('/') && reference.is_parish_location(code) {
        split_location(code)
    } else {
        vec![code]
    }
}

/// Distinct parish locations the station sent from, one per source line.
/// Records expanded from one line are folded back into their county-line
/// form, so an expanded log counts the same as the original.
fn sent_locations_by_line(log: &ParsedLog, reference: &ReferenceData) -> BTreeSet<String> {
    let mut locations = BTreeSet::new();
    let mut index = 0;
    while index < log.qsos.len() {
        let line = log.qsos[index].line;
        let mut parts: Vec<&str> = Vec::new();
        while index < log.qsos.len() && log.qsos[index].line == line {
            for part in split_location(&log.qsos[index].sent_qth) {
                if !parts.contains(&part) {
                    parts.push(part);
                }
            }
            index += 1;
        }
        let location = parts.join("/");
        if reference.is_parish_location(&location) {
            locations.insert(location);
        }
    }
    locations
}

fn mode_category(qsos: &[PreparedQso]) -> ModeCategory {
    let phone = qsos.iter().any(|q| q.mode_group == ModeGroup::Phone);
    let cw_digital = qsos.iter().any(|q| q.mode_group.is_cw_or_digital());
    match (phone, cw_digital) {
        (true, false) => ModeCategory::PhoneOnly,
        (false, true) => ModeCategory::CwDigitalOnly,
        // Both, or an empty log
        _ => ModeCategory::Mixed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cabrillo::parse_cabrillo;

    fn prepare_text(text: &str) -> PreparedLog {
        let contest = Contest::default();
        prepare_log(&parse_cabrillo(text).unwrap(), &contest)
    }

    fn log_with(station: Option<&str>, qsos: &str) -> String {
        let station_line = station
            .map(|s| format!("CATEGORY-STATION: {}\n", s))
            .unwrap_or_default();
        format!(
            "START-OF-LOG: 3.0\nCALLSIGN: W5ABC\nCATEGORY-POWER: LOW\n{}{}END-OF-LOG:\n",
            station_line, qsos
        )
    }

    #[test]
    fn test_basic_preparation() {
        let prepared = prepare_text(&log_with(
            Some("FIXED"),
            "QSO: 7040 CW 2024-04-06 1402 W5ABC/M 599 EBR k1xyz/p 599 MA\n",
        ));
        assert_eq!(prepared.qsos.len(), 1);
        let qso = &prepared.qsos[0];
        assert_eq!(qso.band, Band::B40);
        assert_eq!(qso.mode_group, ModeGroup::Cw);
        assert_eq!(qso.sent_call_key, "W5ABC");
        assert_eq!(qso.rcvd_call_key, "K1XYZ");
        assert_eq!(qso.record.rcvd_call, "K1XYZ/P");
        assert_eq!(qso.sent_class, Some(LocationClass::Parish));
        assert_eq!(qso.rcvd_class, Some(LocationClass::State));

        let class = &prepared.classification;
        assert_eq!(class.location_type, LocationType::LaFixed);
        assert_eq!(class.mode_category, ModeCategory::CwDigitalOnly);
        assert_eq!(class.power, PowerLevel::Low);
        assert_eq!(class.overlay, None);
    }

    #[test]
    fn test_county_line_cartesian_split() {
        let prepared = prepare_text(&log_with(
            Some("FIXED"),
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR/WBR K5XYZ 599 ORLE/JEFF\n",
        ));
        assert_eq!(prepared.source_qso_count, 1);
        assert_eq!(prepared.qsos.len(), 4);
        assert!(prepared.qsos.iter().all(|q| q.line() == 5));
        let pairs: Vec<(&str, &str)> = prepared
            .qsos
            .iter()
            .map(|q| (q.record.sent_qth.as_str(), q.record.rcvd_qth.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("EBR", "ORLE"), ("EBR", "JEFF"), ("WBR", "ORLE"), ("WBR", "JEFF")]
        );
    }

    #[test]
    fn test_out_of_band_is_coerced_with_warning() {
        let prepared = prepare_text(&log_with(
            Some("FIXED"),
            "QSO: 7310 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n",
        ));
        assert_eq!(prepared.qsos[0].band, Band::B40);
        assert!(prepared.warnings.iter().any(|w| w.contains("coerced to 40m")));
    }

    #[test]
    fn test_location_types() {
        let non_la = prepare_text(
            "CALLSIGN: K1XYZ\nCATEGORY-POWER: QRP\nCATEGORY-STATION: FIXED\n\
             QSO: 7040 CW 2024-04-06 1402 K1XYZ 599 MA W5ABC 599 EBR\n",
        );
        assert_eq!(non_la.classification.location_type, LocationType::NonLa);
        assert_eq!(non_la.classification.station_type, None);

        let dx = prepare_text(
            "CALLSIGN: DL1ABC\nCATEGORY-POWER: HIGH\nCATEGORY-STATION: FIXED\n\
             QSO: 14025 CW 2024-04-06 1402 DL1ABC 599 DL W5ABC 599 EBR\n",
        );
        assert_eq!(dx.classification.location_type, LocationType::Dx);

        // LOCATION header wins over the QSO exchange
        let located = prepare_text(
            "CALLSIGN: W5ABC\nLOCATION: TX\nCATEGORY-POWER: LOW\nCATEGORY-STATION: FIXED\n\
             QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n",
        );
        assert_eq!(located.classification.location_type, LocationType::NonLa);

        let empty = prepare_text("CALLSIGN: W5ABC\nCATEGORY-POWER: LOW\nCATEGORY-STATION: FIXED\n");
        assert_eq!(empty.classification.location_type, LocationType::NonLa);
        assert_eq!(empty.classification.mode_category, ModeCategory::Mixed);
    }

    #[test]
    fn test_rover_inferred_from_parish_count() {
        let prepared = prepare_text(&log_with(
            None,
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR K1XYZ 599 MA\n\
             QSO: 7040 CW 2024-04-06 1602 W5ABC 599 WBR K2XYZ 599 NY\n",
        ));
        assert_eq!(prepared.classification.location_type, LocationType::LaRover);
        assert_eq!(prepared.classification.station_type, Some(StationType::Rover));
        assert_eq!(prepared.header.category_station.as_deref(), Some("ROVER"));
    }

    #[test]
    fn test_mobile_header_is_rover() {
        let prepared = prepare_text(&log_with(
            Some("MOBILE"),
            "QSO: 7040 PH 2024-04-06 1402 W5ABC 59 EBR K1XYZ 59 MA\n",
        ));
        assert_eq!(prepared.classification.location_type, LocationType::LaRover);
        assert_eq!(prepared.classification.mode_category, ModeCategory::PhoneOnly);
    }

    #[test]
    fn test_county_line_fixed_station_stays_fixed() {
        let prepared = prepare_text(&log_with(
            None,
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR/WBR K1XYZ 599 MA\n\
             QSO: 7040 CW 2024-04-06 1403 W5ABC 599 EBR/WBR K2XYZ 599 NY\n",
        ));
        assert_eq!(prepared.classification.location_type, LocationType::LaFixed);
    }

    #[test]
    fn test_preparing_twice_is_a_no_op() {
        let contest = Contest::default();
        let first = prepare_text(&log_with(
            None,
            "QSO: 7040 CW 2024-04-06 1402 W5ABC 599 EBR/WBR K1XYZ 599 MA\n\
             QSO: 14250 PH 2024-04-06 1500 W5ABC 59 EBR/WBR K5XYZ 59 ORLE/JEFF\n",
        ));
        let second = prepare_log(&first.to_parsed(), &contest);
        assert_eq!(second.qsos, first.qsos);
        assert_eq!(second.classification, first.classification);
        assert_eq!(second.header, first.header);
    }

    #[test]
    fn test_dx_station_sending_province_code() {
        let prepared = prepare_text(&log_with(
            Some("FIXED"),
            "QSO: 14025 CW 2024-04-06 1402 W5ABC 599 EBR PA3ABC 599 ON\n",
        ));
        assert_eq!(prepared.qsos[0].rcvd_class, Some(LocationClass::Dx));
    }
}
