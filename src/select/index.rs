//! R-tree point index used as a bounding-box pre-filter.
//!
//! Candidates are gathered by envelope intersection, then confirmed with an
//! exact geometry test; results are identical to a full scan.

use geo::Rect;
use rstar::{RTree, RTreeObject, AABB};

use crate::models::AddressRecord;

/// Wrapper for R-tree indexing of one address point.
struct IndexedAddress {
    idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedAddress {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

pub(crate) struct AddressSpatialIndex {
    tree: RTree<IndexedAddress>,
}

impl AddressSpatialIndex {
    pub fn build(records: &[AddressRecord]) -> Self {
        let indexed: Vec<IndexedAddress> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| IndexedAddress {
                idx,
                envelope: AABB::from_point([record.point.lon, record.point.lat]),
            })
            .collect();
        Self {
            tree: RTree::bulk_load(indexed),
        }
    }

    /// Record indices whose point falls inside the bounding rectangle.
    pub fn candidates_in(&self, rect: &Rect<f64>) -> impl Iterator<Item = usize> + '_ {
        let envelope = AABB::from_corners(
            [rect.min().x, rect.min().y],
            [rect.max().x, rect.max().y],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|ia| ia.idx)
    }
}
