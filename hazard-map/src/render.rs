//! Drawing primitives and the [`Canvas`] trait that rendering backends implement.

use hazard_map_types::{Point2d, Size};

use crate::color::Color;

/// Target the map is drawn to. All coordinates are in screen pixels from the top-left corner.
pub trait Canvas {
    /// Size of the drawing area.
    fn size(&self) -> Size;
    /// Clears the drawing area.
    fn clear(&mut self);
    /// Fills a polygon. The first ring is the outer boundary, the rest are holes.
    fn draw_polygon(&mut self, rings: &[Vec<Point2d>], paint: &PolygonPaint);
    /// Strokes a closed ring.
    fn draw_line(&mut self, ring: &[Point2d], paint: &LinePaint);
    /// Draws a point marker.
    fn draw_point(&mut self, position: Point2d, paint: &PointPaint);
}

/// Paint of a polygon fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonPaint {
    /// Fill color.
    pub color: Color,
}

/// Paint of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePaint {
    /// Line color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f64,
}

/// Paint of a point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPaint {
    /// Fill color of the marker.
    pub color: Color,
    /// Outline color of the marker.
    pub outline: Color,
    /// Diameter of the marker in pixels.
    pub size: f64,
}
