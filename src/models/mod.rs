//! Core data models for the address selection engine.

pub mod parsed;
pub mod record;

pub use parsed::ParsedAddress;
pub use record::{AddressRecord, FacilityRecord, GeoPoint};
