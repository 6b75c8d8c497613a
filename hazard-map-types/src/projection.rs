//! Projection of geographic coordinates into a cartesian plane.

use crate::{GeoPoint2d, Point2d};

/// Semimajor axis of the WGS84 ellipsoid in meters.
pub const WGS84_SEMIMAJOR: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Spherical Web Mercator projection (EPSG:3857).
#[derive(Debug, Copy, Clone)]
pub struct WebMercator {
    semimajor: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self {
            semimajor: WGS84_SEMIMAJOR,
        }
    }
}

impl WebMercator {
    /// Projects a geographic point into meters. Returns `None` if the result is not finite.
    pub fn project(&self, input: &GeoPoint2d) -> Option<Point2d> {
        let lat = input.lat().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let x = self.semimajor * input.lon_rad();
        let y = self.semimajor * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln();

        if x.is_finite() && y.is_finite() {
            Some(Point2d::new(x, y))
        } else {
            None
        }
    }

    /// Converts projected coordinates back into a geographic point.
    pub fn unproject(&self, input: &Point2d) -> Option<GeoPoint2d> {
        let lat = std::f64::consts::FRAC_PI_2 - 2.0 * (-input.y / self.semimajor).exp().atan();
        let lon = input.x / self.semimajor;

        let point = GeoPoint2d::latlon(lat.to_degrees(), lon.to_degrees());
        point.lat().is_finite().then_some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projects_origin_to_origin() {
        let projected = WebMercator::default()
            .project(&GeoPoint2d::latlon(0.0, 0.0))
            .expect("projection failed");
        assert_relative_eq!(projected.x, 0.0);
        assert_relative_eq!(projected.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn unproject_restores_point() {
        let projection = WebMercator::default();
        let point = GeoPoint2d::latlon(9.123456, 123.654321);
        let projected = projection.project(&point).expect("projection failed");
        let restored = projection.unproject(&projected).expect("unprojection failed");

        assert_relative_eq!(restored.lat(), point.lat(), epsilon = 1e-9);
        assert_relative_eq!(restored.lon(), point.lon(), epsilon = 1e-9);
    }

    #[test]
    fn clamps_polar_latitude() {
        let projected = WebMercator::default()
            .project(&GeoPoint2d::latlon(90.0, 0.0))
            .expect("projection failed");
        assert!(projected.y.is_finite());
    }
}
