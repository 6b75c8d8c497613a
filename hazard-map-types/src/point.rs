use serde::{Deserialize, Serialize};

/// 2d point on the surface of the Earth, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct GeoPoint2d {
    lat: f64,
    lon: f64,
}

impl GeoPoint2d {
    /// Creates a new point from latitude and longitude in degrees.
    pub const fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude in radians.
    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    /// Longitude in radians.
    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    /// Returns the same point with longitude brought into the `-180..=180` range.
    pub fn wrap_lon(&self) -> Self {
        if (-180.0..=180.0).contains(&self.lon) {
            return *self;
        }

        Self {
            lat: self.lat,
            lon: (self.lon + 180.0).rem_euclid(360.0) - 180.0,
        }
    }

    /// Returns true if both coordinates are finite and within the valid degree ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<GeoPoint2d> for geo_types::Point<f64> {
    fn from(value: GeoPoint2d) -> Self {
        geo_types::Point::new(value.lon, value.lat)
    }
}

/// Creates a new GeoPoint2d from latitude and longitude values (in degrees).
///
/// ```
/// use hazard_map_types::latlon;
///
/// let point = latlon!(9.123456, 123.654321);
/// assert_eq!(point.lat(), 9.123456);
/// ```
#[macro_export]
macro_rules! latlon {
    ($lat:expr, $lon:expr) => {
        ::hazard_map_types::GeoPoint2d::latlon($lat, $lon)
    };
}
