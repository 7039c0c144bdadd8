// US States, DC and Canadian Provinces sent in the LAQP exchange
// Source: USPS (US), Canada Post (CA), LAQP rules
//
// Non-Louisiana US stations send their state (DC counts as a state),
// Canadian stations send their province or territory.

/// Country a state/province belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    UnitedStates,
    Canada,
}

/// A state, district or province abbreviation
#[derive(Debug, Clone)]
pub struct StateProvince {
    /// Two-letter USPS / Canada Post abbreviation
    pub code: &'static str,
    pub name: &'static str,
    pub country: Country,
}

const fn us(code: &'static str, name: &'static str) -> StateProvince {
    StateProvince { code, name, country: Country::UnitedStates }
}

const fn ca(code: &'static str, name: &'static str) -> StateProvince {
    StateProvince { code, name, country: Country::Canada }
}

/// 50 states plus the District of Columbia
pub const US_STATES_AND_DC: &[StateProvince] = &[
    us("AL", "Alabama"), us("AK", "Alaska"), us("AZ", "Arizona"), us("AR", "Arkansas"),
    us("CA", "California"), us("CO", "Colorado"), us("CT", "Connecticut"), us("DE", "Delaware"),
    us("DC", "District of Columbia"), us("FL", "Florida"), us("GA", "Georgia"), us("HI", "Hawaii"),
    us("ID", "Idaho"), us("IL", "Illinois"), us("IN", "Indiana"), us("IA", "Iowa"),
    us("KS", "Kansas"), us("KY", "Kentucky"), us("LA", "Louisiana"), us("ME", "Maine"),
    us("MD", "Maryland"), us("MA", "Massachusetts"), us("MI", "Michigan"), us("MN", "Minnesota"),
    us("MS", "Mississippi"), us("MO", "Missouri"), us("MT", "Montana"), us("NE", "Nebraska"),
    us("NV", "Nevada"), us("NH", "New Hampshire"), us("NJ", "New Jersey"), us("NM", "New Mexico"),
    us("NY", "New York"), us("NC", "North Carolina"), us("ND", "North Dakota"), us("OH", "Ohio"),
    us("OK", "Oklahoma"), us("OR", "Oregon"), us("PA", "Pennsylvania"), us("RI", "Rhode Island"),
    us("SC", "South Carolina"), us("SD", "South Dakota"), us("TN", "Tennessee"), us("TX", "Texas"),
    us("UT", "Utah"), us("VT", "Vermont"), us("VA", "Virginia"), us("WA", "Washington"),
    us("WV", "West Virginia"), us("WI", "Wisconsin"), us("WY", "Wyoming"),
];

/// 10 provinces and 3 territories
pub const CANADIAN_PROVINCES: &[StateProvince] = &[
    ca("AB", "Alberta"), ca("BC", "British Columbia"), ca("MB", "Manitoba"),
    ca("NB", "New Brunswick"), ca("NL", "Newfoundland and Labrador"), ca("NS", "Nova Scotia"),
    ca("ON", "Ontario"), ca("PE", "Prince Edward Island"), ca("QC", "Quebec"),
    ca("SK", "Saskatchewan"),
    ca("NT", "Northwest Territories"), ca("NU", "Nunavut"), ca("YT", "Yukon"),
];

/// Look up a state or province by code
pub fn get_state_or_province(code: &str) -> Option<&'static StateProvince> {
    let code_upper = code.to_uppercase();
    US_STATES_AND_DC
        .iter()
        .chain(CANADIAN_PROVINCES.iter())
        .find(|s| s.code == code_upper)
}
