//! Geometry types used by the hazard map viewer.
//!
//! The crate provides a geographic point type ([`GeoPoint2d`]), the [`WebMercator`] projection used to place
//! geographic coordinates on the screen, bounding rectangles and [`HazardGeometry`], a polygonal geometry read from
//! GeoJSON that supports point-in-polygon tests.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod bounding_rect;
pub mod error;
pub mod geometry;
mod point;
pub mod projection;
mod size;

pub use bounding_rect::BoundingRect;
pub use geometry::{HazardGeometry, ProjectedPolygon};
pub use point::GeoPoint2d;
pub use projection::WebMercator;
pub use size::Size;

/// Point in a cartesian (projected or screen) space.
pub type Point2d = nalgebra::Point2<f64>;

/// Vector in a cartesian (projected or screen) space.
pub type Vector2d = nalgebra::Vector2<f64>;
