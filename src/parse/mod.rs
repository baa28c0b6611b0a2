//! Address decomposition and unit-range expansion.
//!
//! One raw address line becomes one or more [`ParsedAddress`] rows. A
//! hyphenated integer secondary unit ("Apt 5-7") expands into one row per
//! unit in the inclusive range; anything else rides along verbatim. Lines
//! the labeller cannot decompose degrade to a single empty-field row with
//! the original text preserved.

mod labeller;

pub use labeller::{AddressLabeller, LabelOutcome, LabelledAddress, RegexLabeller};

use crate::models::ParsedAddress;

/// Ranges wider than this are treated as literal unit strings. Real unit
/// ranges span a handful of apartments; anything wider is a typo'd
/// house-number range and expanding it would flood the export.
const MAX_UNIT_EXPANSION: i64 = 500;

/// Decompose one raw line into structured rows.
pub fn decompose(line: &str, labeller: &dyn AddressLabeller) -> Vec<ParsedAddress> {
    match labeller.label(line) {
        LabelOutcome::Ambiguous => vec![ParsedAddress::unparsed(line)],
        LabelOutcome::Labelled(labelled) => expand(labelled, line),
    }
}

/// Decompose a batch of lines, flattening expansions.
pub fn decompose_all<'a, I>(lines: I, labeller: &dyn AddressLabeller) -> Vec<ParsedAddress>
where
    I: IntoIterator<Item = &'a str>,
{
    lines
        .into_iter()
        .flat_map(|line| decompose(line, labeller))
        .collect()
}

fn expand(labelled: LabelledAddress, original: &str) -> Vec<ParsedAddress> {
    let base = ParsedAddress {
        house_number: labelled.house_number.clone(),
        street: labelled.street(),
        unit: labelled.unit.clone(),
        city: labelled.city.clone(),
        state: labelled.state.clone(),
        zip: labelled.zip.clone(),
        original: original.to_string(),
    };

    match unit_range(&labelled.unit) {
        Some((start, end)) => (start..=end)
            .map(|unit| ParsedAddress {
                unit: unit.to_string(),
                ..base.clone()
            })
            .collect(),
        None => vec![base],
    }
}

/// An expandable unit range: exactly two integer parts around an ASCII
/// hyphen or en dash, not reversed, not absurdly wide. Everything else is a
/// literal unit string.
fn unit_range(unit: &str) -> Option<(i64, i64)> {
    let parts: Vec<&str> = unit.split(['-', '\u{2013}']).collect();
    if parts.len() != 2 {
        return None;
    }
    let start: i64 = parts[0].trim().parse().ok()?;
    let end: i64 = parts[1].trim().parse().ok()?;
    if end < start || end - start > MAX_UNIT_EXPANSION {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(line: &str) -> Vec<ParsedAddress> {
        decompose(line, &RegexLabeller::new())
    }

    #[test]
    fn test_integer_range_expands_inclusively() {
        let rows = rows("1234 N Main St Apt 5-7, Los Angeles, CA 90001");
        assert_eq!(rows.len(), 3);
        let units: Vec<&str> = rows.iter().map(|r| r.unit.as_str()).collect();
        assert_eq!(units, vec!["5", "6", "7"]);
        for row in &rows {
            assert_eq!(row.house_number, "1234");
            assert_eq!(row.street, "N Main St");
            assert_eq!(row.city, "Los Angeles");
            assert_eq!(row.state, "CA");
            assert_eq!(row.zip, "90001");
            assert_eq!(row.original, "1234 N Main St Apt 5-7, Los Angeles, CA 90001");
        }
    }

    #[test]
    fn test_en_dash_range_expands() {
        let rows = rows("10 Oak Ave Unit 2\u{2013}3, Glendale, CA 91204");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].unit, "2");
        assert_eq!(rows[1].unit, "3");
    }

    #[test]
    fn test_non_numeric_unit_kept_verbatim() {
        let rows = rows("1234 N Main St Apt 5B");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "5B");
    }

    #[test]
    fn test_reversed_range_is_literal() {
        let rows = rows("1234 N Main St Apt 7-5, Los Angeles, CA 90001");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "7-5");
    }

    #[test]
    fn test_alpha_range_is_literal() {
        let rows = rows("1234 N Main St Apt A-B");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "A-B");
    }

    #[test]
    fn test_three_part_range_is_literal() {
        let rows = rows("1234 N Main St Apt 1-2-3");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "1-2-3");
    }

    #[test]
    fn test_oversized_range_is_literal() {
        let rows = rows("1234 N Main St Apt 1-9000");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].unit, "1-9000");
    }

    #[test]
    fn test_ambiguous_line_falls_back_to_original() {
        let rows = rows("Main St Unit A Apt 5, Somewhere");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].house_number.is_empty());
        assert!(rows[0].street.is_empty());
        assert!(rows[0].unit.is_empty());
        assert_eq!(rows[0].original, "Main St Unit A Apt 5, Somewhere");
    }

    #[test]
    fn test_batch_flattens_expansions() {
        let lines = vec!["1 Elm St Apt 1-2", "3 Oak Ave"];
        let all = decompose_all(lines.iter().copied(), &RegexLabeller::new());
        assert_eq!(all.len(), 3);
    }
}
