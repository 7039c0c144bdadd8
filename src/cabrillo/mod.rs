// Cabrillo contest log parser and writer
// Reference: https://wwrof.org/cabrillo/

pub mod bands;
pub mod modes;
pub mod parser;
pub mod time_utils;
pub mod writer;

pub use bands::{freq_to_band, nearest_band, Band};
pub use modes::{is_valid_mode, mode_group, ModeGroup};
pub use parser::{parse_cabrillo, LogHeader, ParsedLog, QsoRecord};
pub use writer::{write_cabrillo, write_qso_line};
