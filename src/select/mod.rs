//! Selection engine: radius-distance and shape-containment membership tests.
//!
//! Both selectors are pure functions over an immutable record slice; the
//! only state anywhere near them is the preview/reset toggle in
//! [`session`], owned by the caller.

pub mod containment;
pub mod distance;
pub mod feature;
mod index;
pub mod session;

use serde::{Deserialize, Serialize};

use crate::models::AddressRecord;

pub use containment::{select_contained, select_in_features};
pub use distance::{
    haversine_miles, is_supported_radius, select_within_radius, EARTH_RADIUS_MILES,
    RADIUS_STEPS_MILES,
};
pub use feature::{interpret_features, FeatureSkip, SelectionGeometry};
pub use session::{transition, SelectionSession, SessionAction, SessionState};

/// Which membership test produced a result. The two modes are mutually
/// exclusive within one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Distance,
    Containment,
}

/// One selected address, with its computed distance in distance mode.
#[derive(Debug, Clone)]
pub struct SelectedAddress {
    pub record: AddressRecord,
    pub distance_miles: Option<f64>,
}

/// Outcome of one selection operation. No record appears twice even when it
/// satisfies several geometries.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub mode: SelectionMode,
    pub matched: Vec<SelectedAddress>,
    pub total: usize,
    /// Malformed features skipped during containment interpretation
    pub skipped_features: Vec<FeatureSkip>,
}

impl FilterResult {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}
