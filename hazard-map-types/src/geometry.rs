//! Polygonal geometry of hazard features.

use geo::BoundingRect as _;
use geo::Contains;
use geo_types::{Coord, LineString, MultiPolygon, Polygon};
use geojson::{PolygonType, Position, Value};

use crate::error::HazardMapTypesError;
use crate::projection::WebMercator;
use crate::{BoundingRect, GeoPoint2d, Point2d};

/// Polygonal geometry in geographic coordinates (`x` is longitude, `y` is latitude).
///
/// Both GeoJSON `Polygon` and `MultiPolygon` values are stored as a multipolygon. A `GeometryCollection` is accepted
/// if it contains at least one polygon, other members of the collection are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardGeometry(MultiPolygon<f64>);

/// A polygon projected into a cartesian space.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPolygon {
    /// Outer ring of the polygon.
    pub exterior: Vec<Point2d>,
    /// Holes of the polygon.
    pub interiors: Vec<Vec<Point2d>>,
}

impl ProjectedPolygon {
    /// Iterates over all rings of the polygon, the outer ring first.
    pub fn rings(&self) -> impl Iterator<Item = &[Point2d]> + '_ {
        std::iter::once(&self.exterior[..]).chain(self.interiors.iter().map(|r| &r[..]))
    }
}

impl HazardGeometry {
    /// Wraps the given multipolygon.
    pub fn new(polygons: MultiPolygon<f64>) -> Self {
        Self(polygons)
    }

    /// Converts a GeoJSON geometry value.
    pub fn from_geojson(value: &Value) -> Result<Self, HazardMapTypesError> {
        let polygons = match value {
            Value::Polygon(polygon) => vec![convert_polygon(polygon)?],
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .map(convert_polygon)
                .collect::<Result<Vec<_>, _>>()?,
            Value::GeometryCollection(members) => {
                let mut polygons = vec![];
                for member in members {
                    if let Ok(geometry) = Self::from_geojson(&member.value) {
                        polygons.extend(geometry.0);
                    }
                }

                if polygons.is_empty() {
                    return Err(HazardMapTypesError::UnsupportedGeometry(
                        "GeometryCollection",
                    ));
                }

                polygons
            }
            Value::Point(_) => return Err(HazardMapTypesError::UnsupportedGeometry("Point")),
            Value::MultiPoint(_) => {
                return Err(HazardMapTypesError::UnsupportedGeometry("MultiPoint"))
            }
            Value::LineString(_) => {
                return Err(HazardMapTypesError::UnsupportedGeometry("LineString"))
            }
            Value::MultiLineString(_) => {
                return Err(HazardMapTypesError::UnsupportedGeometry("MultiLineString"))
            }
        };

        Ok(Self(MultiPolygon::new(polygons)))
    }

    /// The underlying multipolygon.
    pub fn polygons(&self) -> &MultiPolygon<f64> {
        &self.0
    }

    /// Returns true if the point is strictly inside one of the polygons (points in holes are outside).
    pub fn contains(&self, point: &GeoPoint2d) -> bool {
        self.0.contains(&geo_types::Point::from(*point))
    }

    /// Geographic extent of the geometry.
    pub fn bounding_rect(&self) -> Option<BoundingRect> {
        let rect = self.0.bounding_rect()?;
        Some(BoundingRect::new(
            rect.min().x,
            rect.min().y,
            rect.max().x,
            rect.max().y,
        ))
    }

    /// Projects all polygons with the given projection. Returns `None` if any vertex cannot be projected.
    pub fn project(&self, projection: &WebMercator) -> Option<Vec<ProjectedPolygon>> {
        self.0
            .iter()
            .map(|polygon| {
                Some(ProjectedPolygon {
                    exterior: project_ring(polygon.exterior(), projection)?,
                    interiors: polygon
                        .interiors()
                        .iter()
                        .map(|ring| project_ring(ring, projection))
                        .collect::<Option<Vec<_>>>()?,
                })
            })
            .collect()
    }
}

fn project_ring(ring: &LineString<f64>, projection: &WebMercator) -> Option<Vec<Point2d>> {
    ring.coords()
        .map(|c| projection.project(&GeoPoint2d::latlon(c.y, c.x)))
        .collect()
}

fn convert_ring(ring: &[Position]) -> Result<LineString<f64>, HazardMapTypesError> {
    if ring.len() < 3 {
        return Err(HazardMapTypesError::Conversion(format!(
            "polygon ring must contain at least 3 positions, got {}",
            ring.len()
        )));
    }

    ring.iter()
        .map(|position| match position.as_slice() {
            [x, y, ..] => Ok(Coord { x: *x, y: *y }),
            _ => Err(HazardMapTypesError::Conversion(
                "position must contain at least 2 dimensions".to_string(),
            )),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn convert_polygon(polygon: &PolygonType) -> Result<Polygon<f64>, HazardMapTypesError> {
    let Some((exterior, interiors)) = polygon.split_first() else {
        return Err(HazardMapTypesError::Conversion(
            "polygon must contain an outer ring".to_string(),
        ));
    };

    Ok(Polygon::new(
        convert_ring(exterior)?,
        interiors
            .iter()
            .map(|ring| convert_ring(ring))
            .collect::<Result<Vec<_>, _>>()?,
    ))
}
