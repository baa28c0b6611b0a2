//! Error taxonomy for the selection engine.
//!
//! Fatal conditions abort the current operation and carry enough context to
//! identify the offending input. Recoverable conditions (a single malformed
//! feature, an ambiguous address line) are handled locally by the component
//! that hits them and never surface as a `SelectError`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectError {
    /// Unsupported source reference system or a non-finite coordinate value.
    /// Callers must not proceed with unnormalized data after this.
    #[error("coordinate conversion failed: {0}")]
    CoordinateConversion(String),

    /// The facility's region key has no registered address dataset.
    #[error("no address dataset registered for region `{region}` (facility `{facility}`)")]
    UnsupportedRegion { facility: String, region: String },

    /// One drawn feature could not be interpreted. Recovered locally by the
    /// containment selector (the feature is skipped); fatal only when it
    /// leaves zero usable geometries.
    #[error("feature {index} could not be interpreted: {reason}")]
    GeometryInterpretation { index: usize, reason: String },

    /// Zero usable geometries after skipping malformed ones, or zero supplied.
    #[error("no usable selection geometry ({supplied} feature(s) supplied)")]
    EmptySelection { supplied: usize },
}
