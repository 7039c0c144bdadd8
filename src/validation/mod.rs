// Log validation - rule checks that decide whether a log can be scored

mod result;
mod validator;

pub use result::ValidationResult;
pub use validator::{validate_log, LogValidator};
