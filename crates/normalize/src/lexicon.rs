//! Lookup tables for the address tagger: street types, directionals, unit
//! designators, and state codes. All lookups expect upper-cased tokens.

/// Map a street-type token to its USPS abbreviation.
///
/// Covers the designators that occur in practice in US residential data;
/// already-abbreviated forms map to themselves so tagging recognizes both.
pub(crate) fn street_type_abbrev(token: &str) -> Option<&'static str> {
    let abbrev = match token {
        "STREET" | "ST" => "ST",
        "AVENUE" | "AVE" | "AV" => "AVE",
        "BOULEVARD" | "BLVD" => "BLVD",
        "ROAD" | "RD" => "RD",
        "LANE" | "LN" => "LN",
        "COURT" | "CT" => "CT",
        "DRIVE" | "DR" => "DR",
        "PLACE" | "PL" => "PL",
        "WAY" => "WAY",
        "TERRACE" | "TER" => "TER",
        "CIRCLE" | "CIR" => "CIR",
        "PARKWAY" | "PKWY" => "PKWY",
        "HIGHWAY" | "HWY" => "HWY",
        "SQUARE" | "SQ" => "SQ",
        "TRAIL" | "TRL" => "TRL",
        "PLAZA" | "PLZ" => "PLZ",
        "ALLEY" | "ALY" => "ALY",
        "EXPRESSWAY" | "EXPY" => "EXPY",
        "LOOP" => "LOOP",
        "CRESCENT" | "CRES" => "CRES",
        _ => return None,
    };
    Some(abbrev)
}

/// Map a directional token to its abbreviation.
pub(crate) fn directional_abbrev(token: &str) -> Option<&'static str> {
    let abbrev = match token {
        "NORTH" | "N" => "N",
        "SOUTH" | "S" => "S",
        "EAST" | "E" => "E",
        "WEST" | "W" => "W",
        "NORTHEAST" | "NE" => "NE",
        "NORTHWEST" | "NW" => "NW",
        "SOUTHEAST" | "SE" => "SE",
        "SOUTHWEST" | "SW" => "SW",
        _ => return None,
    };
    Some(abbrev)
}

/// Map a unit-designator token to its canonical form. The bare `#` marker is
/// treated as an apartment designator.
pub(crate) fn unit_designator(token: &str) -> Option<&'static str> {
    let canonical = match token {
        "APARTMENT" | "APT" | "UNIT" | "#" => "APT",
        "SUITE" | "STE" => "STE",
        "FLOOR" | "FL" => "FL",
        "BUILDING" | "BLDG" => "BLDG",
        "ROOM" | "RM" => "RM",
        _ => return None,
    };
    Some(canonical)
}

/// Whether a token is a two-letter US state or territory code.
pub(crate) fn is_state_code(token: &str) -> bool {
    matches!(
        token,
        "AL" | "AK" | "AZ" | "AR" | "CA" | "CO" | "CT" | "DE" | "FL" | "GA" | "HI" | "ID"
            | "IL" | "IN" | "IA" | "KS" | "KY" | "LA" | "ME" | "MD" | "MA" | "MI" | "MN"
            | "MS" | "MO" | "MT" | "NE" | "NV" | "NH" | "NJ" | "NM" | "NY" | "NC" | "ND"
            | "OH" | "OK" | "OR" | "PA" | "RI" | "SC" | "SD" | "TN" | "TX" | "UT" | "VT"
            | "VA" | "WA" | "WV" | "WI" | "WY" | "DC" | "PR" | "VI" | "GU" | "AS" | "MP"
    )
}
