//! Catchment - geospatial address selection around school facilities.
//!
//! Normalizes mismatched source coordinate systems into WGS84, selects
//! address records by great-circle radius or drawn-shape containment, and
//! decomposes raw address lines into structured rows for outreach exports.

pub mod config;
pub mod crs;
pub mod error;
pub mod export;
pub mod models;
pub mod parse;
pub mod repo;
pub mod select;

pub use error::SelectError;
pub use models::{AddressRecord, FacilityRecord, GeoPoint, ParsedAddress};
pub use repo::AddressRepository;
pub use select::{FilterResult, SelectionMode};
