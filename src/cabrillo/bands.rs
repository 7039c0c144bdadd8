// Contest Band Definitions
// Reference: LAQP rules and the ARRL band plan
//
// Cabrillo carries frequency in kHz. Only the bands below count for the
// contest; WARC bands and 60m are not contest bands.

use serde::{Deserialize, Serialize};

/// Bands recognized by the contest, ordered from lowest to highest frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "160m")]
    B160,
    #[serde(rename = "80m")]
    B80,
    #[serde(rename = "40m")]
    B40,
    #[serde(rename = "20m")]
    B20,
    #[serde(rename = "15m")]
    B15,
    #[serde(rename = "10m")]
    B10,
    #[serde(rename = "6m")]
    B6,
    #[serde(rename = "2m")]
    B2,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::B160 => "160m",
            Band::B80 => "80m",
            Band::B40 => "40m",
            Band::B20 => "20m",
            Band::B15 => "15m",
            Band::B10 => "10m",
            Band::B6 => "6m",
            Band::B2 => "2m",
        }
    }

    /// All contest bands in frequency order
    pub fn all() -> impl Iterator<Item = Band> {
        BAND_PLAN.iter().map(|edge| edge.band)
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive kHz range for one band
#[derive(Debug, Clone, Copy)]
pub struct BandEdge {
    pub band: Band,
    pub low_khz: u32,
    pub high_khz: u32,
}

/// Contest band plan (kHz, inclusive at both ends)
pub const BAND_PLAN: &[BandEdge] = &[
    BandEdge { band: Band::B160, low_khz: 1_800, high_khz: 2_000 },
    BandEdge { band: Band::B80, low_khz: 3_500, high_khz: 4_000 },
    BandEdge { band: Band::B40, low_khz: 7_000, high_khz: 7_300 },
    BandEdge { band: Band::B20, low_khz: 14_000, high_khz: 14_350 },
    BandEdge { band: Band::B15, low_khz: 21_000, high_khz: 21_450 },
    BandEdge { band: Band::B10, low_khz: 28_000, high_khz: 29_700 },
    BandEdge { band: Band::B6, low_khz: 50_000, high_khz: 54_000 },
    BandEdge { band: Band::B2, low_khz: 144_000, high_khz: 148_000 },
];

/// Cabrillo allows VHF logs to carry the band (in MHz) instead of a frequency
const VHF_SHORTHAND: &[(u32, Band)] = &[(50, Band::B6), (144, Band::B2)];

/// Returns the contest band for a frequency in kHz
pub fn freq_to_band(freq_khz: u32) -> Option<Band> {
    if let Some((_, band)) = VHF_SHORTHAND.iter().find(|(mhz, _)| *mhz == freq_khz) {
        return Some(*band);
    }
    BAND_PLAN
        .iter()
        .find(|edge| (edge.low_khz..=edge.high_khz).contains(&freq_khz))
        .map(|edge| edge.band)
}

/// Nearest band to an out-of-band frequency, with the distance in kHz to its edge.
/// In-band frequencies return distance 0.
pub fn nearest_band(freq_khz: u32) -> (Band, u32) {
    if let Some(band) = freq_to_band(freq_khz) {
        return (band, 0);
    }
    let mut best = (BAND_PLAN[0].band, u32::MAX);
    for edge in BAND_PLAN {
        let distance = if freq_khz < edge.low_khz {
            edge.low_khz - freq_khz
        } else {
            freq_khz.saturating_sub(edge.high_khz)
        };
        if distance < best.1 {
            best = (edge.band, distance);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freq_to_band() {
        assert_eq!(freq_to_band(7_074), Some(Band::B40));
        assert_eq!(freq_to_band(14_250), Some(Band::B20));
        assert_eq!(freq_to_band(3_573), Some(Band::B80));
        assert_eq!(freq_to_band(50_313), Some(Band::B6));
        assert_eq!(freq_to_band(1_800), Some(Band::B160)); // lower edge inclusive
        assert_eq!(freq_to_band(29_700), Some(Band::B10)); // upper edge inclusive
        assert_eq!(freq_to_band(10_136), None); // 30m is not a contest band
        assert_eq!(freq_to_band(999_000), None);
    }

    #[test]
    fn test_vhf_shorthand() {
        assert_eq!(freq_to_band(50), Some(Band::B6));
        assert_eq!(freq_to_band(144), Some(Band::B2));
        assert_eq!(freq_to_band(432), None);
    }

    #[test]
    fn test_nearest_band() {
        assert_eq!(nearest_band(7_150), (Band::B40, 0));
        assert_eq!(nearest_band(7_310), (Band::B40, 10));
        assert_eq!(nearest_band(13_990), (Band::B20, 10));
        assert_eq!(nearest_band(10_136).0, Band::B40);
    }

    #[test]
    fn test_band_order() {
        let bands: Vec<&str> = Band::all().map(|b| b.as_str()).collect();
        assert_eq!(bands, vec!["160m", "80m", "40m", "20m", "15m", "10m", "6m", "2m"]);
        assert!(Band::B160 < Band::B2);
    }
}
