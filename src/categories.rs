// Contest categories
//
// 36 categories: {NON-LA, LA Fixed, LA Rover} x {Phone, CW/Digital, Mixed}
// x {QRP, Low, High, Overlay}. DX stations compete as NON-LA.
//
// A log always has a base category (location, mode, power) and, when it
// claims an overlay, also sits in the overlay category for the same
// location and mode. Never more than two.

use serde::{Serialize, Serializer};

use crate::preparation::LogClassification;
use crate::types::{LocationType, ModeCategory, Overlay, PowerLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CategoryLocation {
    NonLa,
    LaFixed,
    LaRover,
}

impl CategoryLocation {
    pub fn from_location_type(location: LocationType) -> Self {
        match location {
            LocationType::Dx | LocationType::NonLa => CategoryLocation::NonLa,
            LocationType::LaFixed => CategoryLocation::LaFixed,
            LocationType::LaRover => CategoryLocation::LaRover,
        }
    }

    fn short(&self) -> &'static str {
        match self {
            CategoryLocation::NonLa => "nl",
            CategoryLocation::LaFixed => "lf",
            CategoryLocation::LaRover => "lr",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            CategoryLocation::NonLa => "NON-LA",
            CategoryLocation::LaFixed => "LA Fixed",
            CategoryLocation::LaRover => "LA Rover",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CategoryMode {
    Phone,
    CwDigital,
    Mixed,
}

impl CategoryMode {
    pub fn from_mode_category(mode: ModeCategory) -> Self {
        match mode {
            ModeCategory::PhoneOnly => CategoryMode::Phone,
            ModeCategory::CwDigitalOnly => CategoryMode::CwDigital,
            ModeCategory::Mixed => CategoryMode::Mixed,
        }
    }

    fn short(&self) -> &'static str {
        match self {
            CategoryMode::Phone => "ph",
            CategoryMode::CwDigital => "cw",
            CategoryMode::Mixed => "mx",
        }
    }

    fn display(&self) -> &'static str {
        match self {
            CategoryMode::Phone => "Phone Only",
            CategoryMode::CwDigital => "CW Only",
            CategoryMode::Mixed => "Mixed",
        }
    }
}

fn power_short(power: PowerLevel) -> &'static str {
    match power {
        PowerLevel::Qrp => "qp",
        PowerLevel::Low => "lo",
        PowerLevel::High => "hi",
    }
}

fn power_display(power: PowerLevel) -> &'static str {
    match power {
        PowerLevel::Qrp => "QRP",
        PowerLevel::Low => "Low Power",
        PowerLevel::High => "High Power",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BaseCategory {
    pub location: CategoryLocation,
    pub mode: CategoryMode,
    pub power: PowerLevel,
}

/// Overlay slot of a location/mode pair. The overlay kind is not part of
/// the category; WIRES, TB-WIRES and POTA entrants compete together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OverlayCategory {
    pub location: CategoryLocation,
    pub mode: CategoryMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayEntry {
    pub kind: Overlay,
    pub category: OverlayCategory,
}

/// Categories one log competes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryAssignment {
    pub base: BaseCategory,
    pub overlay: Option<OverlayEntry>,
}

impl CategoryAssignment {
    pub fn for_classification(classification: &LogClassification) -> Self {
        let location = CategoryLocation::from_location_type(classification.location_type);
        let mode = CategoryMode::from_mode_category(classification.mode_category);
        Self {
            base: BaseCategory {
                location,
                mode,
                power: classification.power,
            },
            overlay: classification.overlay.map(|kind| OverlayEntry {
                kind,
                category: OverlayCategory { location, mode },
            }),
        }
    }

    /// One id, or two when an overlay is claimed
    pub fn ids(&self) -> Vec<CategoryId> {
        let mut ids = vec![CategoryId::Base(self.base)];
        if let Some(entry) = &self.overlay {
            ids.push(CategoryId::Overlay(entry.category));
        }
        ids
    }
}

/// A single ranking bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryId {
    Base(BaseCategory),
    Overlay(OverlayCategory),
}

impl CategoryId {
    /// File/variable style id, e.g. `nl_ph_lo` or `lr_mx_ol`
    pub fn short_id(&self) -> String {
        match self {
            CategoryId::Base(c) => {
                format!("{}_{}_{}", c.location.short(), c.mode.short(), power_short(c.power))
            }
            CategoryId::Overlay(c) => format!("{}_{}_ol", c.location.short(), c.mode.short()),
        }
    }

    /// e.g. `NON-LA - Phone Only - Low Power`
    pub fn display_name(&self) -> String {
        match self {
            CategoryId::Base(c) => format!(
                "{} - {} - {}",
                c.location.display(),
                c.mode.display(),
                power_display(c.power)
            ),
            CategoryId::Overlay(c) => {
                format!("{} - {} - Overlay", c.location.display(), c.mode.display())
            }
        }
    }

    /// All 36 categories in report order
    pub fn all() -> Vec<CategoryId> {
        let locations = [CategoryLocation::NonLa, CategoryLocation::LaFixed, CategoryLocation::LaRover];
        let modes = [CategoryMode::Phone, CategoryMode::CwDigital, CategoryMode::Mixed];
        let powers = [PowerLevel::Qrp, PowerLevel::Low, PowerLevel::High];

        let mut ids = Vec::with_capacity(36);
        for location in locations {
            for mode in modes {
                for power in powers {
                    ids.push(CategoryId::Base(BaseCategory { location, mode, power }));
                }
                ids.push(CategoryId::Overlay(OverlayCategory { location, mode }));
            }
        }
        ids
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.short_id())
    }
}

impl Serialize for CategoryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.short_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StationType;
    use std::collections::HashSet;

    fn classification(
        location_type: LocationType,
        mode_category: ModeCategory,
        power: PowerLevel,
        overlay: Option<Overlay>,
    ) -> LogClassification {
        LogClassification {
            callsign: "W5ABC".to_string(),
            location_type,
            station_type: Some(StationType::Fixed),
            mode_category,
            power,
            overlay,
        }
    }

    #[test]
    fn test_thirty_six_unique_categories() {
        let all = CategoryId::all();
        assert_eq!(all.len(), 36);
        let ids: HashSet<String> = all.iter().map(|c| c.short_id()).collect();
        assert_eq!(ids.len(), 36);
        assert_eq!(all[0].short_id(), "nl_ph_qp");
        assert_eq!(all[3].short_id(), "nl_ph_ol");
        assert_eq!(all[35].short_id(), "lr_mx_ol");
    }

    #[test]
    fn test_base_only() {
        let assignment = CategoryAssignment::for_classification(&classification(
            LocationType::LaFixed,
            ModeCategory::PhoneOnly,
            PowerLevel::Low,
            None,
        ));
        let ids = assignment.ids();
        assert_eq!(ids.len(), 1);
        assert_eq!(ids[0].short_id(), "lf_ph_lo");
        assert_eq!(ids[0].display_name(), "LA Fixed - Phone Only - Low Power");
    }

    #[test]
    fn test_dx_folds_into_non_la() {
        let assignment = CategoryAssignment::for_classification(&classification(
            LocationType::Dx,
            ModeCategory::CwDigitalOnly,
            PowerLevel::High,
            None,
        ));
        assert_eq!(assignment.ids()[0].short_id(), "nl_cw_hi");
    }

    #[test]
    fn test_overlay_adds_second_category() {
        let assignment = CategoryAssignment::for_classification(&classification(
            LocationType::LaRover,
            ModeCategory::Mixed,
            PowerLevel::Qrp,
            Some(Overlay::Pota),
        ));
        let ids: Vec<String> = assignment.ids().iter().map(|c| c.short_id()).collect();
        assert_eq!(ids, vec!["lr_mx_qp".to_string(), "lr_mx_ol".to_string()]);
        assert_eq!(assignment.overlay.map(|o| o.kind), Some(Overlay::Pota));
    }

    #[test]
    fn test_serializes_as_short_id() {
        let id = CategoryId::Overlay(OverlayCategory {
            location: CategoryLocation::NonLa,
            mode: CategoryMode::Phone,
        });
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"nl_ph_ol\"");
    }
}
