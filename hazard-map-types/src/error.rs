//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum HazardMapTypesError {
    /// Geometry conversion error.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
    /// The geometry is valid GeoJSON, but is not polygonal.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometry(&'static str),
}
