//! Interpretation of drawn selection features into usable geometries.
//!
//! Features arrive as loose JSON from the drawing collaborator: either a
//! polygon given by its vertices or a point carrying a non-standard
//! `radiusMeters` field signaling "this point is actually a circle". A
//! malformed feature is skipped individually; interpretation never aborts
//! the batch.

use geo::{Coord, LineString, Polygon};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SelectError;
use crate::models::GeoPoint;

/// Linear meters-to-degrees conversion calibrated at the equator.
///
/// Circle containment is evaluated in degree space, so a drawn circle is
/// buffered by `radius / METERS_PER_DEGREE` degrees. This underestimates
/// ground distance away from the equator and distorts east-west near the
/// poles; acceptable for neighborhood-scale selections, and deliberately
/// not corrected.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

const CIRCLE_SEGMENTS: usize = 64;

/// One interpreted selection geometry. Rectangles arrive as 4-vertex
/// polygons; circles keep their center/radius and are polygonized at test
/// time.
#[derive(Debug, Clone)]
pub enum SelectionGeometry {
    Polygon(Polygon<f64>),
    Circle { center: GeoPoint, radius_meters: f64 },
}

impl SelectionGeometry {
    /// The polygon actually tested against record points.
    pub fn to_polygon(&self) -> Polygon<f64> {
        match self {
            SelectionGeometry::Polygon(poly) => poly.clone(),
            SelectionGeometry::Circle {
                center,
                radius_meters,
            } => circle_polygon(*center, *radius_meters),
        }
    }
}

/// A feature the interpreter had to skip, kept for reporting.
#[derive(Debug, Clone)]
pub struct FeatureSkip {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    vertices: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    coordinates: Option<Vec<f64>>,
    #[serde(rename = "radiusMeters", default)]
    radius_meters: Option<f64>,
}

/// Interpret a feature array, collecting usable geometries and one skip
/// entry per malformed feature.
pub fn interpret_features(features: &[Value]) -> (Vec<SelectionGeometry>, Vec<FeatureSkip>) {
    let mut geometries = Vec::new();
    let mut skipped = Vec::new();

    for (index, value) in features.iter().enumerate() {
        match interpret_one(index, value) {
            Ok(geometry) => geometries.push(geometry),
            Err(SelectError::GeometryInterpretation { index, reason }) => {
                skipped.push(FeatureSkip { index, reason });
            }
            Err(other) => {
                skipped.push(FeatureSkip {
                    index,
                    reason: other.to_string(),
                });
            }
        }
    }

    (geometries, skipped)
}

fn interpret_one(index: usize, value: &Value) -> Result<SelectionGeometry, SelectError> {
    let fail = |reason: String| SelectError::GeometryInterpretation { index, reason };

    let raw: RawFeature = serde_json::from_value(value.clone())
        .map_err(|e| fail(format!("invalid feature structure: {e}")))?;

    match raw.kind.as_str() {
        "Polygon" => {
            let vertices = raw
                .vertices
                .ok_or_else(|| fail("polygon feature missing `vertices`".to_string()))?;
            if vertices.len() < 3 {
                return Err(fail(format!(
                    "polygon needs at least 3 vertices, got {}",
                    vertices.len()
                )));
            }
            let mut ring = Vec::with_capacity(vertices.len() + 1);
            for v in &vertices {
                let [lon, lat] = v.as_slice() else {
                    return Err(fail(format!("vertex must be [lon, lat], got {v:?}")));
                };
                if !lon.is_finite() || !lat.is_finite() {
                    return Err(fail(format!("non-finite vertex ({lon}, {lat})")));
                }
                ring.push(Coord { x: *lon, y: *lat });
            }
            // Close the ring if needed
            if ring.first() != ring.last() {
                ring.push(ring[0]);
            }
            Ok(SelectionGeometry::Polygon(Polygon::new(
                LineString::new(ring),
                vec![],
            )))
        }
        "Point" => {
            let coords = raw
                .coordinates
                .ok_or_else(|| fail("point feature missing `coordinates`".to_string()))?;
            let [lon, lat] = coords.as_slice() else {
                return Err(fail(format!(
                    "point coordinates must be [lon, lat], got {coords:?}"
                )));
            };
            if !lon.is_finite() || !lat.is_finite() {
                return Err(fail(format!("non-finite center ({lon}, {lat})")));
            }
            let radius_meters = raw
                .radius_meters
                .ok_or_else(|| fail("point feature missing `radiusMeters`".to_string()))?;
            if !radius_meters.is_finite() || radius_meters <= 0.0 {
                return Err(fail(format!("invalid radius {radius_meters}")));
            }
            Ok(SelectionGeometry::Circle {
                center: GeoPoint::new(*lon, *lat),
                radius_meters,
            })
        }
        other => Err(fail(format!("unsupported geometry type `{other}`"))),
    }
}

/// Polygonize a drawn circle in degree space (see [`METERS_PER_DEGREE`]).
pub fn circle_polygon(center: GeoPoint, radius_meters: f64) -> Polygon<f64> {
    let radius_deg = radius_meters / METERS_PER_DEGREE;
    let ring: Vec<Coord<f64>> = (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * (i as f64) / (CIRCLE_SEGMENTS as f64);
            Coord {
                x: center.lon + radius_deg * theta.cos(),
                y: center.lat + radius_deg * theta.sin(),
            }
        })
        .collect();
    Polygon::new(LineString::new(ring), vec![])
}
