// LAQP Library
// Louisiana QSO Party log processing: parse -> validate -> prepare -> score,
// then standings and statistics over a batch.

pub mod cabrillo;
pub mod categories;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod preparation;
pub mod reference;
pub mod scoring;
pub mod standings;
pub mod statistics;
pub mod types;
pub mod validation;
