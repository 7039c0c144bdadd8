// Standings - placement lists over a finished batch of score records
//
// Ordering everywhere: score descending, then more valid (non-duplicate)
// QSOs, then callsign ascending.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::categories::CategoryId;
use crate::scoring::ScoreRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// 1-based
    pub rank: usize,
    pub callsign: String,
    pub score: u64,
    pub valid_qsos: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStanding {
    pub category: CategoryId,
    pub display_name: String,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub overall: Vec<Placement>,
    /// Categories with at least one entrant, in report order
    pub by_category: Vec<CategoryStanding>,
}

/// Placement order between two records
pub fn compare_records(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.final_score
        .cmp(&a.final_score)
        .then_with(|| b.valid_qso_count().cmp(&a.valid_qso_count()))
        .then_with(|| a.callsign.cmp(&b.callsign))
}

fn rank(records: &mut [&ScoreRecord]) -> Vec<Placement> {
    records.sort_by(|a, b| compare_records(a, b));
    records
        .iter()
        .enumerate()
        .map(|(index, record)| Placement {
            rank: index + 1,
            callsign: record.callsign.clone(),
            score: record.final_score,
            valid_qsos: record.valid_qso_count(),
        })
        .collect()
}

pub fn build_standings(records: &[ScoreRecord]) -> Standings {
    let mut all: Vec<&ScoreRecord> = records.iter().collect();
    let overall = rank(&mut all);

    let mut grouped: BTreeMap<CategoryId, Vec<&ScoreRecord>> = BTreeMap::new();
    for record in records {
        for id in record.categories.ids() {
            grouped.entry(id).or_default().push(record);
        }
    }

    let by_category = CategoryId::all()
        .into_iter()
        .filter_map(|id| {
            let mut members = grouped.remove(&id)?;
            Some(CategoryStanding {
                category: id,
                display_name: id.display_name(),
                placements: rank(&mut members),
            })
        })
        .collect();

    log::debug!("Built standings for {} logs", records.len());

    Standings { overall, by_category }
}
