//! Coordinate normalization into geographic WGS84 lon/lat degrees.
//!
//! Facility and address tables arrive in whatever projected system their
//! source published (the LA address table is State Plane zone 5 in US feet,
//! the facility table web mercator). Each table is normalized independently
//! before any distance or containment math runs; nothing downstream ever
//! sees unnormalized coordinates.

use proj4rs::proj::Proj;
use proj4rs::transform::transform;

use crate::error::SelectError;
use crate::models::GeoPoint;

/// Geographic target for every normalization.
const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// PROJ.4 definitions for the supported source systems.
///
/// EPSG:2229/2230 are NAD83 California State Plane zones 5 and 6 in US
/// survey feet, hence the explicit `to_meter`.
const SUPPORTED: &[(u32, &str)] = &[
    (4326, WGS84),
    (
        3857,
        "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +no_defs",
    ),
    (
        2229,
        "+proj=lcc +lat_1=35.46666666666666 +lat_2=34.03333333333333 +lat_0=33.5 +lon_0=-118 +x_0=2000000.0001016 +y_0=500000.0001016001 +datum=NAD83 +to_meter=0.3048006096012192 +no_defs",
    ),
    (
        2230,
        "+proj=lcc +lat_1=33.88333333333333 +lat_2=32.78333333333333 +lat_0=32.16666666666666 +lon_0=-116.25 +x_0=2000000.0001016 +y_0=500000.0001016001 +datum=NAD83 +to_meter=0.3048006096012192 +no_defs",
    ),
];

/// One-way transformer from a declared source system into WGS84 degrees.
#[derive(Debug)]
pub struct CrsTransformer {
    epsg: u32,
    source: Proj,
    target: Proj,
}

impl CrsTransformer {
    /// Build a transformer from an identifier like `"EPSG:2229"` (a bare
    /// numeric code is also accepted).
    pub fn from_code(code: &str) -> Result<Self, SelectError> {
        let digits = code.trim().trim_start_matches("EPSG:").trim_start_matches("epsg:");
        let epsg: u32 = digits.parse().map_err(|_| {
            SelectError::CoordinateConversion(format!("unrecognized CRS identifier `{code}`"))
        })?;
        Self::from_epsg(epsg)
    }

    pub fn from_epsg(epsg: u32) -> Result<Self, SelectError> {
        let proj_string = SUPPORTED
            .iter()
            .find(|(code, _)| *code == epsg)
            .map(|(_, s)| *s)
            .ok_or_else(|| {
                SelectError::CoordinateConversion(format!("unsupported source CRS EPSG:{epsg}"))
            })?;

        let source = Proj::from_proj_string(proj_string).map_err(|e| {
            SelectError::CoordinateConversion(format!("EPSG:{epsg} definition rejected: {e}"))
        })?;
        let target = Proj::from_proj_string(WGS84).map_err(|e| {
            SelectError::CoordinateConversion(format!("WGS84 definition rejected: {e}"))
        })?;

        Ok(Self { epsg, source, target })
    }

    pub fn epsg(&self) -> u32 {
        self.epsg
    }

    /// Project one coordinate pair (source units) to lon/lat degrees.
    pub fn normalize_pair(&self, x: f64, y: f64) -> Result<GeoPoint, SelectError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(SelectError::CoordinateConversion(format!(
                "non-finite coordinate ({x}, {y}) in EPSG:{} input",
                self.epsg
            )));
        }

        // Geographic source: proj4rs wants radians in; already degrees here.
        if self.epsg == 4326 {
            return Ok(GeoPoint::new(x, y));
        }

        let mut point = (x, y, 0.0);
        transform(&self.source, &self.target, &mut point).map_err(|e| {
            SelectError::CoordinateConversion(format!(
                "EPSG:{} -> WGS84 transform failed for ({x}, {y}): {e}",
                self.epsg
            ))
        })?;

        // Geographic target comes back in radians.
        Ok(GeoPoint::new(point.0.to_degrees(), point.1.to_degrees()))
    }

    /// Project a batch, preserving input order and length exactly. Inputs
    /// are not mutated; any bad pair fails the whole call.
    pub fn normalize(&self, pairs: &[(f64, f64)]) -> Result<Vec<GeoPoint>, SelectError> {
        pairs
            .iter()
            .map(|&(x, y)| self.normalize_pair(x, y))
            .collect()
    }
}
