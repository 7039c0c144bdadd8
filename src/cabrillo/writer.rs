// Cabrillo Writer
// Serializes a header and QSO records back to Cabrillo 3.0 text. Used to emit
// prepared logs (one line per expanded county-line record).

use std::fmt::Write as _;

use super::parser::{LogHeader, QsoRecord};
use super::time_utils::format_cabrillo_time;

/// Format one QSO: line with single-space separators
pub fn write_qso_line(qso: &QsoRecord) -> String {
    let mut line = format!(
        "QSO: {} {} {} {} {} {} {} {} {} {}",
        qso.freq_khz,
        qso.mode,
        qso.date.format("%Y-%m-%d"),
        format_cabrillo_time(&qso.time),
        qso.sent_call,
        qso.sent_rst,
        qso.sent_qth,
        qso.rcvd_call,
        qso.rcvd_rst,
        qso.rcvd_qth,
    );
    if let Some(tx) = &qso.transmitter {
        line.push(' ');
        line.push_str(tx);
    }
    line
}

/// Write a complete Cabrillo log
pub fn write_cabrillo<'a>(header: &LogHeader, qsos: impl IntoIterator<Item = &'a QsoRecord>) -> String {
    let mut out = String::new();
    out.push_str("START-OF-LOG: 3.0\n");

    let single_fields = [
        ("CALLSIGN", &header.callsign),
        ("CONTEST", &header.contest),
        ("CATEGORY-OPERATOR", &header.category_operator),
        ("CATEGORY-POWER", &header.category_power),
        ("CATEGORY-STATION", &header.category_station),
        ("CATEGORY-OVERLAY", &header.category_overlay),
        ("LOCATION", &header.location),
        ("CLAIMED-SCORE", &header.claimed_score),
        ("CLUB", &header.club),
        ("NAME", &header.name),
        ("EMAIL", &header.email),
        ("OPERATORS", &header.operators),
        ("CREATED-BY", &header.created_by),
    ];
    for (keyword, value) in single_fields {
        if let Some(value) = value {
            let _ = writeln!(out, "{}: {}", keyword, value);
        }
    }
    for line in &header.address {
        let _ = writeln!(out, "ADDRESS: {}", line);
    }
    for line in &header.soapbox {
        let _ = writeln!(out, "SOAPBOX: {}", line);
    }

    for qso in qsos {
        out.push_str(&write_qso_line(qso));
        out.push('\n');
    }

    out.push_str("END-OF-LOG:\n");
    out
}
