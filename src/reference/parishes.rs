// Louisiana Parishes
// Source: LAQP rules, official parish abbreviations used in the exchange
//
// 64 parishes. Codes are what stations send; names are for reports.

/// Louisiana parish with its contest abbreviation
#[derive(Debug, Clone)]
pub struct Parish {
    /// Contest abbreviation (e.g., "EBR")
    pub code: &'static str,
    /// Full parish name
    pub name: &'static str,
}

/// All 64 Louisiana parishes
pub const LA_PARISHES: &[Parish] = &[
    Parish { code: "ACAD", name: "Acadia" },
    Parish { code: "ALLE", name: "Allen" },
    Parish { code: "ASCE", name: "Ascension" },
    Parish { code: "ASSU", name: "Assumption" },
    Parish { code: "AVOY", name: "Avoyelles" },
    Parish { code: "BEAU", name: "Beauregard" },
    Parish { code: "BIEN", name: "Bienville" },
    Parish { code: "BOSS", name: "Bossier" },
    Parish { code: "CADD", name: "Caddo" },
    Parish { code: "CALC", name: "Calcasieu" },
    Parish { code: "CALD", name: "Caldwell" },
    Parish { code: "CAME", name: "Cameron" },
    Parish { code: "CATA", name: "Catahoula" },
    Parish { code: "CLAI", name: "Claiborne" },
    Parish { code: "CONC", name: "Concordia" },
    Parish { code: "DESO", name: "De Soto" },
    Parish { code: "EBR", name: "East Baton Rouge" },
    Parish { code: "ECAR", name: "East Carroll" },
    Parish { code: "EFEL", name: "East Feliciana" },
    Parish { code: "EVAN", name: "Evangeline" },
    Parish { code: "FRAN", name: "Franklin" },
    Parish { code: "GRAN", name: "Grant" },
    Parish { code: "IBER", name: "Iberia" },
    Parish { code: "IBVL", name: "Iberville" },
    Parish { code: "JACK", name: "Jackson" },
    Parish { code: "JEFF", name: "Jefferson" },
    Parish { code: "JDAV", name: "Jefferson Davis" },
    Parish { code: "LAFA", name: "Lafayette" },
    Parish { code: "LAFO", name: "Lafourche" },
    Parish { code: "LASA", name: "La Salle" },
    Parish { code: "LINC", name: "Lincoln" },
    Parish { code: "LIVI", name: "Livingston" },
    Parish { code: "MADI", name: "Madison" },
    Parish { code: "MORE", name: "Morehouse" },
    Parish { code: "NATC", name: "Natchitoches" },
    Parish { code: "ORLE", name: "Orleans" },
    Parish { code: "OUAC", name: "Ouachita" },
    Parish { code: "PLAQ", name: "Plaquemines" },
    Parish { code: "POIN", name: "Pointe Coupee" },
    Parish { code: "RAPI", name: "Rapides" },
    Parish { code: "REDR", name: "Red River" },
    Parish { code: "RICH", name: "Richland" },
    Parish { code: "SABI", name: "Sabine" },
    Parish { code: "STBE", name: "St. Bernard" },
    Parish { code: "STCH", name: "St. Charles" },
    Parish { code: "STHE", name: "St. Helena" },
    Parish { code: "STJA", name: "St. James" },
    Parish { code: "STJO", name: "St. John the Baptist" },
    Parish { code: "STLA", name: "St. Landry" },
    Parish { code: "STMA", name: "St. Martin" },
    Parish { code: "STMY", name: "St. Mary" },
    Parish { code: "STTA", name: "St. Tammany" },
    Parish { code: "TANG", name: "Tangipahoa" },
    Parish { code: "TENS", name: "Tensas" },
    Parish { code: "TERR", name: "Terrebonne" },
    Parish { code: "UNIO", name: "Union" },
    Parish { code: "VERM", name: "Vermilion" },
    Parish { code: "VERN", name: "Vernon" },
    Parish { code: "WASH", name: "Washington" },
    Parish { code: "WEBS", name: "Webster" },
    Parish { code: "WBR", name: "West Baton Rouge" },
    Parish { code: "WCAR", name: "West Carroll" },
    Parish { code: "WFEL", name: "West Feliciana" },
    Parish { code: "WINN", name: "Winn" },
];

/// Get parish by code
pub fn get_parish(code: &str) -> Option<&'static Parish> {
    let code_upper = code.to_uppercase();
    LA_PARISHES.iter().find(|p| p.code == code_upper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parish_count() {
        assert_eq!(LA_PARISHES.len(), 64);
    }

    #[test]
    fn test_parish_codes_unique() {
        let codes: HashSet<_> = LA_PARISHES.iter().map(|p| p.code).collect();
        assert_eq!(codes.len(), LA_PARISHES.len());
    }

    #[test]
    fn test_parish_lookup() {
        assert_eq!(get_parish("ebr").map(|p| p.name), Some("East Baton Rouge"));
        assert!(get_parish("XXXX").is_none());
    }
}
