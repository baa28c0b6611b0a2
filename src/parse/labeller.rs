//! Role labelling of raw address lines.
//!
//! Labelling is heuristic. Rather than throwing on a line it cannot commit
//! to, a labeller returns [`LabelOutcome::Ambiguous`] and the caller decides
//! what to do with the line; a batch is never aborted by one bad address.

use regex::Regex;

/// Substring roles assigned to one address line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelledAddress {
    pub house_number: String,
    pub pre_directional: String,
    pub street_name: String,
    pub street_type: String,
    pub post_directional: String,
    /// Secondary-unit designator value, e.g. "5-7" or "5B"; empty when absent
    pub unit: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl LabelledAddress {
    /// Directionals, name, and type rejoined into one street field.
    pub fn street(&self) -> String {
        [
            self.pre_directional.as_str(),
            self.street_name.as_str(),
            self.street_type.as_str(),
            self.post_directional.as_str(),
        ]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Two-variant labelling result; ambiguity is an ordinary outcome, not an
/// error.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelOutcome {
    Labelled(LabelledAddress),
    Ambiguous,
}

/// Capability of tagging substrings of a raw line with address roles.
pub trait AddressLabeller {
    fn label(&self, line: &str) -> LabelOutcome;
}

const STREET_TYPES: &[&str] = &[
    "ALY", "ALLEY", "AVE", "AVENUE", "BLVD", "BOULEVARD", "CIR", "CIRCLE", "CT", "COURT", "DR",
    "DRIVE", "HWY", "HIGHWAY", "LN", "LANE", "PKWY", "PARKWAY", "PL", "PLACE", "RD", "ROAD", "ST",
    "STREET", "TER", "TERRACE", "TRL", "TRAIL", "WAY",
];

const DIRECTIONALS: &[&str] = &[
    "N", "S", "E", "W", "NE", "NW", "SE", "SW", "NORTH", "SOUTH", "EAST", "WEST",
];

/// Secondary-unit keywords, shared by the street-line grammar and the
/// duplicate-designator check so the two can never drift apart. `#` is
/// handled separately (no word boundary).
const UNIT_KEYWORDS: &[&str] = &[
    "APT", "APARTMENT", "UNIT", "STE", "SUITE", "SP", "SPC", "BLDG", "RM", "FL",
];

/// Default labeller: comma-segmented grammar over house number, optional
/// pre-directional, street name/type, optional secondary unit, city, and a
/// trailing "ST 12345" state/zip segment.
pub struct RegexLabeller {
    street_line: Regex,
    state_zip: Regex,
    zip_only: Regex,
    unit_keyword: Regex,
}

impl Default for RegexLabeller {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexLabeller {
    pub fn new() -> Self {
        let directional = DIRECTIONALS.join("|");
        let keyword = UNIT_KEYWORDS.join("|");
        let street_line = Regex::new(&format!(
            r"(?i)^(?P<house>\d+[A-Z]?)\s+(?:(?P<pre>{directional})\.?\s+)?(?P<name>.+?)(?:\s+(?:{keyword}|#)\.?\s*(?P<unit>\S+))?$"
        ))
        .expect("street line regex");
        let state_zip = Regex::new(r"^(?P<state>[A-Za-z]{2})\.?\s+(?P<zip>\d{5})(?:-\d{4})?$")
            .expect("state/zip regex");
        let zip_only = Regex::new(r"^(?P<zip>\d{5})(?:-\d{4})?$").expect("zip regex");
        let unit_keyword = Regex::new(&format!(r"(?i)(?:\b(?:{keyword})\b|#)"))
            .expect("unit keyword regex");
        Self {
            street_line,
            state_zip,
            zip_only,
            unit_keyword,
        }
    }

    /// Peel street type and post-directional off the tail of the raw name.
    fn split_name(&self, raw_name: &str) -> (String, String, String) {
        let mut tokens: Vec<&str> = raw_name.split_whitespace().collect();
        let mut post_directional = String::new();
        let mut street_type = String::new();

        if tokens.len() > 1 {
            let last = tokens[tokens.len() - 1].trim_end_matches('.');
            if DIRECTIONALS.contains(&last.to_ascii_uppercase().as_str()) {
                post_directional = last.to_string();
                tokens.pop();
            }
        }
        if tokens.len() > 1 {
            let last = tokens[tokens.len() - 1].trim_end_matches('.');
            if STREET_TYPES.contains(&last.to_ascii_uppercase().as_str()) {
                street_type = last.to_string();
                tokens.pop();
            }
        }

        (tokens.join(" "), street_type, post_directional)
    }
}

impl AddressLabeller for RegexLabeller {
    fn label(&self, line: &str) -> LabelOutcome {
        let segments: Vec<&str> = line
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() || segments.len() > 3 {
            return LabelOutcome::Ambiguous;
        }

        // Two unit designators on one line cannot be assigned a single role
        if self.unit_keyword.find_iter(segments[0]).count() > 1 {
            return LabelOutcome::Ambiguous;
        }

        let Some(caps) = self.street_line.captures(segments[0]) else {
            return LabelOutcome::Ambiguous;
        };

        let mut labelled = LabelledAddress {
            house_number: caps["house"].to_string(),
            pre_directional: caps.name("pre").map(|m| m.as_str().to_string()).unwrap_or_default(),
            unit: caps.name("unit").map(|m| m.as_str().to_string()).unwrap_or_default(),
            ..LabelledAddress::default()
        };
        let (name, street_type, post_directional) = self.split_name(&caps["name"]);
        labelled.street_name = name;
        labelled.street_type = street_type;
        labelled.post_directional = post_directional;

        // Trailing segments: optional city, optional state/zip
        let mut rest = &segments[1..];
        if let Some(last) = rest.last() {
            if let Some(sz) = self.state_zip.captures(last) {
                labelled.state = sz["state"].to_string();
                labelled.zip = sz["zip"].to_string();
                rest = &rest[..rest.len() - 1];
            } else if let Some(z) = self.zip_only.captures(last) {
                labelled.zip = z["zip"].to_string();
                rest = &rest[..rest.len() - 1];
            }
        }
        labelled.city = rest.join(", ");

        LabelOutcome::Labelled(labelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(line: &str) -> LabelOutcome {
        RegexLabeller::new().label(line)
    }

    fn labelled(line: &str) -> LabelledAddress {
        match label(line) {
            LabelOutcome::Labelled(l) => l,
            LabelOutcome::Ambiguous => panic!("expected `{line}` to label"),
        }
    }

    #[test]
    fn test_full_line_with_unit_range() {
        let l = labelled("1234 N Main St Apt 5-7, Los Angeles, CA 90001");
        assert_eq!(l.house_number, "1234");
        assert_eq!(l.pre_directional, "N");
        assert_eq!(l.street_name, "Main");
        assert_eq!(l.street_type, "St");
        assert_eq!(l.unit, "5-7");
        assert_eq!(l.city, "Los Angeles");
        assert_eq!(l.state, "CA");
        assert_eq!(l.zip, "90001");
        assert_eq!(l.street(), "N Main St");
    }

    #[test]
    fn test_street_only_line() {
        let l = labelled("987 WILLOW CREEK RD");
        assert_eq!(l.house_number, "987");
        assert_eq!(l.street_name, "WILLOW CREEK");
        assert_eq!(l.street_type, "RD");
        assert!(l.unit.is_empty());
        assert!(l.city.is_empty());
    }

    #[test]
    fn test_post_directional() {
        let l = labelled("12 Capitol Ave NW, Washington");
        assert_eq!(l.street_name, "Capitol");
        assert_eq!(l.street_type, "Ave");
        assert_eq!(l.post_directional, "NW");
        assert_eq!(l.city, "Washington");
    }

    #[test]
    fn test_street_named_like_a_type_survives() {
        // "Union" is not in the type table; "St" is
        let l = labelled("1234 Union St");
        assert_eq!(l.street_name, "Union");
        assert_eq!(l.street_type, "St");
    }

    #[test]
    fn test_duplicate_unit_designators_ambiguous() {
        assert_eq!(label("10 Main St Unit A Apt 5"), LabelOutcome::Ambiguous);
    }

    #[test]
    fn test_every_unit_keyword_counts_toward_ambiguity() {
        // FL and SP are accepted by the street grammar, so a second
        // designator next to them must also trip the duplicate check
        assert_eq!(label("10 Main St FL 2 Apt 5"), LabelOutcome::Ambiguous);
        assert_eq!(label("10 Main St SP 4 Unit 9"), LabelOutcome::Ambiguous);
    }

    #[test]
    fn test_missing_house_number_ambiguous() {
        assert_eq!(label("Main St, Los Angeles"), LabelOutcome::Ambiguous);
    }

    #[test]
    fn test_too_many_segments_ambiguous() {
        assert_eq!(
            label("1 A St, B, C, D 12345"),
            LabelOutcome::Ambiguous
        );
    }

    #[test]
    fn test_zip_without_state() {
        let l = labelled("55 Elm Ave, Pasadena, 91101");
        assert_eq!(l.city, "Pasadena");
        assert!(l.state.is_empty());
        assert_eq!(l.zip, "91101");
    }
}
