//! Shape-containment selection.
//!
//! A record is selected when its point lies inside or on the boundary of at
//! least one usable geometry. `geo::Intersects` gives the boundary-inclusive
//! test (a point exactly on an edge counts); `Contains` would exclude it.

use geo::{BoundingRect, Intersects, Point};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{info, warn};

use super::feature::{interpret_features, SelectionGeometry};
use super::index::AddressSpatialIndex;
use super::{FilterResult, SelectedAddress, SelectionMode};
use crate::error::SelectError;
use crate::models::AddressRecord;

/// Union of records contained in at least one geometry, deduplicated by
/// record identity, in input record order.
pub fn select_contained<'a>(
    records: &'a [AddressRecord],
    geometries: &[SelectionGeometry],
) -> Vec<&'a AddressRecord> {
    let index = AddressSpatialIndex::build(records);
    let mut matched: BTreeSet<usize> = BTreeSet::new();

    for geometry in geometries {
        let polygon = geometry.to_polygon();
        let Some(rect) = polygon.bounding_rect() else {
            continue;
        };
        for idx in index.candidates_in(&rect) {
            if matched.contains(&idx) {
                continue;
            }
            let point = Point::new(records[idx].point.lon, records[idx].point.lat);
            if polygon.intersects(&point) {
                matched.insert(idx);
            }
        }
    }

    matched.into_iter().map(|idx| &records[idx]).collect()
}

/// Interpret raw drawn features and run containment selection.
///
/// Malformed features are skipped with a warning and reported in the result;
/// the whole operation fails only when nothing usable remains.
pub fn select_in_features(
    records: &[AddressRecord],
    features: &[Value],
) -> Result<FilterResult, SelectError> {
    let (geometries, skipped) = interpret_features(features);

    for skip in &skipped {
        warn!("Skipping feature {}: {}", skip.index, skip.reason);
    }

    if geometries.is_empty() {
        return Err(SelectError::EmptySelection {
            supplied: features.len(),
        });
    }

    let matched: Vec<SelectedAddress> = select_contained(records, &geometries)
        .into_iter()
        .map(|record| SelectedAddress {
            record: record.clone(),
            distance_miles: None,
        })
        .collect();

    info!(
        "{} addresses found inside {} geometr{}",
        matched.len(),
        geometries.len(),
        if geometries.len() == 1 { "y" } else { "ies" }
    );

    Ok(FilterResult {
        mode: SelectionMode::Containment,
        total: matched.len(),
        matched,
        skipped_features: skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;
    use serde_json::json;

    fn record(text: &str, lon: f64, lat: f64) -> AddressRecord {
        AddressRecord {
            raw_text: text.to_string(),
            point: GeoPoint::new(lon, lat),
            region_key: "r".to_string(),
        }
    }

    fn unit_square() -> Value {
        json!({
            "type": "Polygon",
            "vertices": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        })
    }

    #[test]
    fn test_overlapping_circle_and_polygon_match_once() {
        let records = vec![record("P", 0.5, 0.5), record("OUT", 5.0, 5.0)];
        // Circle centered on P, well overlapping the square
        let circle = json!({
            "type": "Point",
            "coordinates": [0.5, 0.5],
            "radiusMeters": 10_000.0
        });
        let result = select_in_features(&records, &[unit_square(), circle]).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.matched[0].record.raw_text, "P");
    }

    #[test]
    fn test_point_on_edge_is_contained() {
        let records = vec![record("EDGE", 1.0, 0.5)];
        let result = select_in_features(&records, &[unit_square()]).unwrap();
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_vertex_point_is_contained() {
        let records = vec![record("CORNER", 0.0, 0.0)];
        let result = select_in_features(&records, &[unit_square()]).unwrap();
        assert_eq!(result.total, 1);
    }

    #[test]
    fn test_malformed_feature_skipped_valid_one_kept() {
        let records = vec![record("IN", 0.5, 0.5)];
        let malformed = json!({"type": "Polygon"});
        let result = select_in_features(&records, &[malformed, unit_square()]).unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.skipped_features.len(), 1);
        assert_eq!(result.skipped_features[0].index, 0);
    }

    #[test]
    fn test_zero_features_is_fatal() {
        let records = vec![record("IN", 0.5, 0.5)];
        let err = select_in_features(&records, &[]).unwrap_err();
        assert!(matches!(err, SelectError::EmptySelection { supplied: 0 }));
    }

    #[test]
    fn test_all_features_malformed_is_fatal() {
        let records = vec![record("IN", 0.5, 0.5)];
        let features = vec![json!({"type": "Blob"}), json!(42)];
        let err = select_in_features(&records, &features).unwrap_err();
        assert!(matches!(err, SelectError::EmptySelection { supplied: 2 }));
    }

    #[test]
    fn test_empty_match_set_is_normal() {
        let records = vec![record("FAR", 50.0, 50.0)];
        let result = select_in_features(&records, &[unit_square()]).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, 0);
    }

    #[test]
    fn test_result_in_record_order() {
        let records = vec![
            record("A", 0.1, 0.1),
            record("B", 0.2, 0.2),
            record("C", 0.3, 0.3),
        ];
        // Two squares, second one covering C and A
        let small = json!({
            "type": "Polygon",
            "vertices": [[0.25, 0.25], [0.35, 0.25], [0.35, 0.35], [0.25, 0.35]]
        });
        let result = select_in_features(&records, &[small, unit_square()]).unwrap();
        let names: Vec<&str> = result
            .matched
            .iter()
            .map(|m| m.record.raw_text.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
