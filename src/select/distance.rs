//! Great-circle radius selection.

use tracing::info;

use super::{FilterResult, SelectedAddress, SelectionMode};
use crate::models::{AddressRecord, FacilityRecord, GeoPoint};

/// Spherical earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// The radius choices offered to users, in statute miles.
pub const RADIUS_STEPS_MILES: &[f64] = &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 1.0, 2.0, 3.0, 4.0, 5.0];

pub fn is_supported_radius(radius_miles: f64) -> bool {
    RADIUS_STEPS_MILES
        .iter()
        .any(|step| (step - radius_miles).abs() < 1e-9)
}

/// Haversine great-circle distance in statute miles.
///
/// The asin argument is clamped to [0, 1]: floating-point overshoot near
/// antipodal points can push it a hair past 1 and out of asin's domain.
pub fn haversine_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let h = (dlat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_MILES * h.sqrt().clamp(0.0, 1.0).asin()
}

/// Select every record within `radius_miles` of the facility, boundary
/// inclusive. Records must already be restricted to the facility's region.
/// Input order is preserved; each match carries its computed distance.
pub fn select_within_radius(
    facility: &FacilityRecord,
    records: &[AddressRecord],
    radius_miles: f64,
) -> FilterResult {
    let matched: Vec<SelectedAddress> = records
        .iter()
        .filter_map(|record| {
            let miles = haversine_miles(facility.point, record.point);
            (miles <= radius_miles).then(|| SelectedAddress {
                record: record.clone(),
                distance_miles: Some(miles),
            })
        })
        .collect();

    info!(
        "{} addresses found within {} miles of {}",
        matched.len(),
        radius_miles,
        facility.label
    );

    FilterResult {
        mode: SelectionMode::Distance,
        total: matched.len(),
        matched,
        skipped_features: Vec::new(),
    }
}
