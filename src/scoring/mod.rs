// Scoring - points, duplicates, multipliers and bonuses for one prepared log

mod engine;
mod record;

pub use engine::{score_log, ScoringEngine};
pub use record::{
    Bonus, BonusSource, DuplicateKey, MultiplierKey, ScoreBreakdown, ScoreRecord, ScoredQso,
};
