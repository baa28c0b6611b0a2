//! Immutable dataset repository.
//!
//! Loads the facility table and every region's address table once at
//! startup, normalizes each with its declared CRS, and serves them read-only
//! to the selectors. Built explicitly and passed by reference; there is no
//! hidden process-wide cache.

mod ingest;

use hashbrown::HashMap;
use tracing::info;

use crate::config::Config;
use crate::error::SelectError;
use crate::models::{AddressRecord, FacilityRecord};

pub use ingest::{read_address_table, read_facility_table};

pub struct AddressRepository {
    regions: HashMap<String, Vec<AddressRecord>>,
    facilities: Vec<FacilityRecord>,
}

impl AddressRepository {
    /// Load and normalize every dataset named in the config.
    pub fn load(config: &Config) -> anyhow::Result<Self> {
        let facilities = read_facility_table(&config.facilities)?;
        info!("Loaded {} facilities", facilities.len());

        let mut regions = HashMap::new();
        for region in &config.regions {
            let records = read_address_table(region)?;
            info!("Region `{}`: {} address records", region.key, records.len());
            regions.insert(region.key.clone(), records);
        }

        Ok(Self { regions, facilities })
    }

    /// Assemble a repository from already-built records (tests, embedding).
    pub fn from_parts(
        facilities: Vec<FacilityRecord>,
        regions: HashMap<String, Vec<AddressRecord>>,
    ) -> Self {
        Self { regions, facilities }
    }

    /// Address records for a facility's region.
    pub fn region_records(&self, facility: &FacilityRecord) -> Result<&[AddressRecord], SelectError> {
        self.regions
            .get(&facility.region_key)
            .map(Vec::as_slice)
            .ok_or_else(|| SelectError::UnsupportedRegion {
                facility: facility.label.clone(),
                region: facility.region_key.clone(),
            })
    }

    pub fn facility(&self, label: &str) -> Option<&FacilityRecord> {
        self.facilities.iter().find(|f| f.label == label)
    }

    /// Facility display names, sorted for listing.
    pub fn facility_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.facilities.iter().map(|f| f.label.as_str()).collect();
        labels.sort_unstable();
        labels
    }

    pub fn facilities(&self) -> &[FacilityRecord] {
        &self.facilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    fn facility(label: &str, region: &str) -> FacilityRecord {
        FacilityRecord {
            label: label.to_string(),
            point: GeoPoint::new(-118.3, 34.0),
            region_key: region.to_string(),
        }
    }

    #[test]
    fn test_unknown_region_is_fatal() {
        let repo = AddressRepository::from_parts(vec![facility("Solo", "nowhere")], HashMap::new());
        let f = repo.facility("Solo").unwrap();
        let err = repo.region_records(f).unwrap_err();
        match err {
            SelectError::UnsupportedRegion { facility, region } => {
                assert_eq!(facility, "Solo");
                assert_eq!(region, "nowhere");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_labels_sorted() {
        let repo = AddressRepository::from_parts(
            vec![facility("Zinnia Elementary", "r"), facility("Alder High", "r")],
            HashMap::new(),
        );
        assert_eq!(repo.facility_labels(), vec!["Alder High", "Zinnia Elementary"]);
    }
}
