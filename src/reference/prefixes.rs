// Callsign prefix classification and callsign cleanup
// Source: ITU prefix allocations for the United States and Canada
//
// The contest only needs to know whether a station is in the US, in Canada,
// or DX. Anything that matches no US/Canadian block is DX.

use serde::Serialize;

/// Country group a callsign belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallsignCountry {
    UnitedStates,
    Canada,
    Dx,
}

/// A prefix block allocated to the US or Canada
#[derive(Debug, Clone)]
pub struct PrefixRule {
    /// The prefix the callsign starts with (e.g., "K", "VE", "AA")
    pub prefix: &'static str,
    pub country: CallsignCountry,
}

const fn rule(prefix: &'static str, country: CallsignCountry) -> PrefixRule {
    PrefixRule { prefix, country }
}

use CallsignCountry::{Canada, UnitedStates};

/// US (A, K, N, W blocks) and Canadian (CF-CK, CY-CZ, VA-VG, VO, VX-VY, XJ-XO) prefixes
pub const PREFIX_RULES: &[PrefixRule] = &[
    // United States
    rule("K", UnitedStates), rule("N", UnitedStates), rule("W", UnitedStates),
    rule("AA", UnitedStates), rule("AB", UnitedStates), rule("AC", UnitedStates),
    rule("AD", UnitedStates), rule("AE", UnitedStates), rule("AF", UnitedStates),
    rule("AG", UnitedStates), rule("AH", UnitedStates), rule("AI", UnitedStates),
    rule("AJ", UnitedStates), rule("AK", UnitedStates), rule("AL", UnitedStates),
    // Canada
    rule("VA", Canada), rule("VB", Canada), rule("VC", Canada), rule("VD", Canada),
    rule("VE", Canada), rule("VF", Canada), rule("VG", Canada), rule("VO", Canada),
    rule("VX", Canada), rule("VY", Canada),
    rule("CF", Canada), rule("CG", Canada), rule("CH", Canada), rule("CI", Canada),
    rule("CJ", Canada), rule("CK", Canada), rule("CY", Canada), rule("CZ", Canada),
    rule("XJ", Canada), rule("XK", Canada), rule("XL", Canada), rule("XM", Canada),
    rule("XN", Canada), rule("XO", Canada),
];

/// Suffixes that mark portable/mobile operation rather than a location
const PORTABLE_SUFFIXES: &[&str] = &["M", "MM", "P", "R", "AM", "QRP", "A"];

/// Strip portable/mobile designators so the callsign can be used as a key.
///
/// `W5ABC/M` and `W5ABC/5` become `W5ABC`; for a compound call such as
/// `VE3/W5ABC` the longest segment containing a digit is kept.
pub fn normalize_callsign(call: &str) -> String {
    let upper = call.trim().to_uppercase();
    let segments: Vec<&str> = upper
        .split('/')
        .filter(|s| !s.is_empty())
        .filter(|s| !PORTABLE_SUFFIXES.contains(s))
        .filter(|s| !(s.len() == 1 && s.chars().all(|c| c.is_ascii_digit())))
        .collect();

    match segments.as_slice() {
        [] => upper.clone(),
        [only] => only.to_string(),
        many => {
            let mut best = many[0];
            for seg in many.iter().copied() {
                let has_digit = seg.chars().any(|c| c.is_ascii_digit());
                if has_digit && seg.len() > best.len() {
                    best = seg;
                }
            }
            best.to_string()
        }
    }
}

/// Basic callsign sanity: letters/digits (and '/'), 3+ characters, at least one digit
pub fn is_valid_callsign(call: &str) -> bool {
    if call.len() < 3 {
        return false;
    }
    let only_alphanum = call.chars().all(|c| c.is_ascii_alphanumeric() || c == '/');
    let has_digit = call.chars().any(|c| c.is_ascii_digit());
    only_alphanum && has_digit
}

/// Classify a callsign as US, Canadian or DX.
///
/// A leading prefix designator (`VP9/W5ABC`, `VE3/K1XYZ`) decides the
/// country, since that is where the station is operating.
pub fn callsign_country(call: &str) -> CallsignCountry {
    let upper = call.trim().to_uppercase();
    let base = normalize_callsign(&upper);
    let operating = match upper.split_once('/') {
        Some((first, _)) if !first.is_empty() && first.len() < base.len() => first.to_string(),
        _ => base,
    };

    let mut best: Option<&PrefixRule> = None;
    for rule in PREFIX_RULES {
        if operating.starts_with(rule.prefix)
            && best.map_or(true, |b| rule.prefix.len() > b.prefix.len())
        {
            best = Some(rule);
        }
    }
    best.map_or(CallsignCountry::Dx, |rule| rule.country)
}

/// True when the callsign is neither US nor Canadian
pub fn is_dx_callsign(call: &str) -> bool {
    callsign_country(call) == CallsignCountry::Dx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_callsigns() {
        assert_eq!(callsign_country("W1AW"), CallsignCountry::UnitedStates);
        assert_eq!(callsign_country("K5ABC"), CallsignCountry::UnitedStates);
        assert_eq!(callsign_country("N7XYZ"), CallsignCountry::UnitedStates);
        assert_eq!(callsign_country("AA1BB"), CallsignCountry::UnitedStates);
        assert_eq!(callsign_country("KH6ABC"), CallsignCountry::UnitedStates);
    }

    #[test]
    fn test_canadian_callsigns() {
        assert_eq!(callsign_country("VE3ABC"), CallsignCountry::Canada);
        assert_eq!(callsign_country("VA7XYZ"), CallsignCountry::Canada);
        assert_eq!(callsign_country("CF3AAA"), CallsignCountry::Canada);
        assert_eq!(callsign_country("VF3ABC"), CallsignCountry::Canada);
        assert_eq!(callsign_country("VG7XYZ"), CallsignCountry::Canada);
    }

    #[test]
    fn test_dx_callsigns() {
        assert!(is_dx_callsign("DL1ABC"));
        assert!(is_dx_callsign("G3ABC"));
        assert!(is_dx_callsign("AM5XX")); // Spain, outside AA-AL
        assert!(is_dx_callsign("XE1ABC")); // Mexico
        assert!(is_dx_callsign("PA3ABC"));
    }

    #[test]
    fn test_prefix_designator_decides_country() {
        assert_eq!(callsign_country("VP9/W5ABC"), CallsignCountry::Dx);
        assert_eq!(callsign_country("VE3/K1XYZ"), CallsignCountry::Canada);
        assert_eq!(callsign_country("W5ABC/M"), CallsignCountry::UnitedStates);
    }

    #[test]
    fn test_normalize_callsign() {
        assert_eq!(normalize_callsign("W5ABC/M"), "W5ABC");
        assert_eq!(normalize_callsign("w5abc/r"), "W5ABC");
        assert_eq!(normalize_callsign("W5ABC/P"), "W5ABC");
        assert_eq!(normalize_callsign("W5ABC/5"), "W5ABC");
        assert_eq!(normalize_callsign("VE3/W5ABC"), "W5ABC");
        assert_eq!(normalize_callsign("K1XYZ"), "K1XYZ");
    }

    #[test]
    fn test_is_valid_callsign() {
        assert!(is_valid_callsign("W5ABC"));
        assert!(is_valid_callsign("W5ABC/M"));
        assert!(!is_valid_callsign("W5"));
        assert!(!is_valid_callsign("WABC"));
        assert!(!is_valid_callsign("W5-ABC"));
    }
}
