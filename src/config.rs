// Contest configuration
//
// Everything that changes from one running of the party to the next lives
// here: the session window, scoring constants and the club station. Values
// default to the LAQP rules, and a JSON file only needs the fields it changes.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::cabrillo::ModeGroup;
use crate::error::ConfigError;
use crate::reference::ReferenceData;

/// Scoring and timing rules for one contest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestConfig {
    pub name: String,
    /// First valid QSO time (UTC, inclusive)
    pub window_start: NaiveDateTime,
    /// Last valid QSO time (UTC, inclusive)
    pub window_end: NaiveDateTime,
    pub phone_points: u32,
    pub cw_digital_points: u32,
    /// Club station whose contact earns a one-time bonus
    pub club_call: String,
    pub club_bonus: u32,
    /// Bonus per distinct parish activated by an LA rover
    pub rover_parish_bonus: u32,
}

impl Default for ContestConfig {
    fn default() -> Self {
        Self {
            name: "LA-QSO-PARTY".to_string(),
            window_start: utc(2024, 4, 6, 14, 0),
            window_end: utc(2024, 4, 7, 2, 0),
            phone_points: 2,
            cw_digital_points: 4,
            club_call: "N5LCC".to_string(),
            club_bonus: 100,
            rover_parish_bonus: 50,
        }
    }
}

fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

impl ContestConfig {
    /// Parse a JSON config; missing fields keep their LAQP defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ContestConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded contest config {} from {} ({} to {})",
            config.name,
            path.display(),
            config.window_start,
            config.window_end
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_end < self.window_start {
            return Err(ConfigError::InvalidWindow {
                start: self.window_start.to_string(),
                end: self.window_end.to_string(),
            });
        }
        Ok(())
    }

    /// True when the timestamp falls inside the session, both ends inclusive
    pub fn in_window(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.window_start && timestamp <= self.window_end
    }

    pub fn points_for(&self, mode: ModeGroup) -> u32 {
        if mode.is_cw_or_digital() {
            self.cw_digital_points
        } else {
            self.phone_points
        }
    }
}

/// Configuration plus reference tables for one processing run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contest {
    pub config: ContestConfig,
    pub reference: ReferenceData,
}

impl Contest {
    pub fn new(config: ContestConfig, reference: ReferenceData) -> Self {
        Self { config, reference }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_defaults() {
        let config = ContestConfig::default();
        assert_eq!(config.window_start.to_string(), "2024-04-06 14:00:00");
        assert_eq!(config.window_end.to_string(), "2024-04-07 02:00:00");
        assert_eq!(config.points_for(ModeGroup::Phone), 2);
        assert_eq!(config.points_for(ModeGroup::Cw), 4);
        assert_eq!(config.points_for(ModeGroup::Digital), 4);
    }

    #[test]
    fn test_window_is_inclusive() {
        let config = ContestConfig::default();
        assert!(config.in_window(config.window_start));
        assert!(config.in_window(config.window_end));
        assert!(!config.in_window(config.window_end + Duration::seconds(1)));
        assert!(!config.in_window(config.window_start - Duration::seconds(1)));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ContestConfig::from_json_str(
            r#"{ "window_start": "2025-04-05T14:00:00", "window_end": "2025-04-06T02:00:00" }"#,
        )
        .unwrap();
        assert_eq!(config.window_start.to_string(), "2025-04-05 14:00:00");
        assert_eq!(config.club_call, "N5LCC");
        assert_eq!(config.rover_parish_bonus, 50);
    }

    #[test]
    fn test_inverted_window_rejected() {
        let err = ContestConfig::from_json_str(
            r#"{ "window_start": "2025-04-06T02:00:00", "window_end": "2025-04-05T14:00:00" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWindow { .. }));
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = ContestConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contest.json");
        std::fs::write(&path, r#"{ "name": "LAQP-TEST", "club_bonus": 200 }"#).unwrap();
        let config = ContestConfig::from_json_file(&path).unwrap();
        assert_eq!(config.name, "LAQP-TEST");
        assert_eq!(config.club_bonus, 200);

        let missing = ContestConfig::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
