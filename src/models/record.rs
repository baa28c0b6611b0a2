//! Core record types shared across the selection engine.

use serde::{Deserialize, Serialize};

/// Geographic point (lon/lat, WGS84 degrees once normalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// One row of a region's address table, coordinates already normalized.
///
/// Records are compared only against facilities sharing the same
/// `region_key`; identity for dedup purposes is the record's index within
/// its region table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Raw single-line address text as it appeared in the source table
    pub raw_text: String,
    pub point: GeoPoint,
    /// Partition identifier grouping this record with its region dataset
    pub region_key: String,
}

/// One facility (school site) row, coordinates already normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRecord {
    /// Unique display name
    pub label: String,
    pub point: GeoPoint,
    pub region_key: String,
}
