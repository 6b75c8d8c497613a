use hazard_map_types::{BoundingRect, GeoPoint2d, Point2d, Size, Vector2d, WebMercator};

/// Position and scale of the map on the screen.
///
/// The map is displayed in Web Mercator projection. `position` is the projected point at the center of the screen
/// and `resolution` is the number of projected meters per screen pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    position: Point2d,
    resolution: f64,
    size: Size,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            position: Point2d::origin(),
            resolution: 1.0,
            size: Size::new(0.0, 0.0),
        }
    }
}

impl MapView {
    /// Creates a new view centered at the given geographic point.
    pub fn new(center: &GeoPoint2d, resolution: f64) -> Self {
        Self {
            position: WebMercator::default()
                .project(center)
                .unwrap_or_else(Point2d::origin),
            resolution,
            ..Default::default()
        }
    }

    /// Projected point at the center of the screen.
    pub fn position(&self) -> Point2d {
        self.position
    }

    /// Geographic point at the center of the screen.
    pub fn center(&self) -> Option<GeoPoint2d> {
        WebMercator::default().unproject(&self.position)
    }

    /// Meters per pixel.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns a copy of the view with the given resolution.
    pub fn with_resolution(&self, resolution: f64) -> Self {
        Self {
            resolution,
            ..*self
        }
    }

    /// Size of the screen.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns a copy of the view with the given screen size.
    pub fn with_size(&self, new_size: Size) -> Self {
        Self {
            size: new_size,
            ..*self
        }
    }

    /// Converts a projected point to screen pixels.
    pub fn map_to_screen(&self, point: &Point2d) -> Point2d {
        Point2d::new(
            (point.x - self.position.x) / self.resolution + self.size.half_width(),
            self.size.half_height() - (point.y - self.position.y) / self.resolution,
        )
    }

    /// Converts screen pixels to a projected point.
    pub fn screen_to_map(&self, px: &Point2d) -> Point2d {
        Point2d::new(
            self.position.x + (px.x - self.size.half_width()) * self.resolution,
            self.position.y - (px.y - self.size.half_height()) * self.resolution,
        )
    }

    /// Converts screen pixels to a geographic point. Longitude is wrapped into the `-180..=180` range, so points of
    /// the repeated worlds beyond the antimeridian resolve to the same location.
    pub fn screen_to_latlon(&self, px: &Point2d) -> Option<GeoPoint2d> {
        WebMercator::default()
            .unproject(&self.screen_to_map(px))
            .map(|point| point.wrap_lon())
    }

    /// Converts a geographic point to screen pixels.
    pub fn latlon_to_screen(&self, point: &GeoPoint2d) -> Option<Point2d> {
        let projected = WebMercator::default().project(point)?;
        Some(self.map_to_screen(&projected))
    }

    /// Projected area visible on the screen.
    pub fn get_bbox(&self) -> BoundingRect {
        let half_width = self.size.half_width() * self.resolution;
        let half_height = self.size.half_height() * self.resolution;
        BoundingRect::new(
            self.position.x - half_width,
            self.position.y - half_height,
            self.position.x + half_width,
            self.position.y + half_height,
        )
    }

    /// Moves the view so that the map follows a pointer moved by `px_delta` pixels.
    pub fn translate(&self, px_delta: Vector2d) -> Self {
        Self {
            position: Point2d::new(
                self.position.x - px_delta.x * self.resolution,
                self.position.y + px_delta.y * self.resolution,
            ),
            ..*self
        }
    }

    /// Changes the resolution by `zoom` times, keeping the map point under `base_point` in place.
    pub fn zoom(&self, zoom: f64, base_point: Point2d) -> Self {
        let anchor = self.screen_to_map(&base_point);
        let resolution = self.resolution * zoom;

        Self {
            position: Point2d::new(
                anchor.x - (base_point.x - self.size.half_width()) * resolution,
                anchor.y + (base_point.y - self.size.half_height()) * resolution,
            ),
            resolution,
            ..*self
        }
    }

    /// Linear interpolation between this view and `target`. `k = 0.0` returns this view, `k = 1.0` the target.
    pub(crate) fn interpolate(&self, target: &MapView, k: f64) -> Self {
        let k = k.clamp(0.0, 1.0);
        Self {
            position: self.position + (target.position - self.position) * k,
            resolution: self.resolution + (target.resolution - self.resolution) * k,
            size: target.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_view() -> MapView {
        MapView::new(&GeoPoint2d::latlon(9.3, 123.3), 100.0).with_size(Size::new(800.0, 600.0))
    }

    #[test]
    fn center_of_screen_is_view_center() {
        let view = test_view();
        let center = view
            .screen_to_latlon(&Point2d::new(400.0, 300.0))
            .expect("invalid point");

        assert_relative_eq!(center.lat(), 9.3, epsilon = 1e-9);
        assert_relative_eq!(center.lon(), 123.3, epsilon = 1e-9);
    }

    #[test]
    fn screen_and_map_conversions_are_inverse() {
        let view = test_view();
        let px = Point2d::new(120.0, 530.0);
        let back = view.map_to_screen(&view.screen_to_map(&px));

        assert_relative_eq!(back.x, px.x, epsilon = 1e-9);
        assert_relative_eq!(back.y, px.y, epsilon = 1e-9);
    }

    #[test]
    fn screen_y_axis_points_down() {
        let view = test_view();
        let top = view.screen_to_latlon(&Point2d::new(400.0, 0.0)).unwrap();
        let bottom = view.screen_to_latlon(&Point2d::new(400.0, 600.0)).unwrap();
        assert!(top.lat() > bottom.lat());
    }

    #[test]
    fn longitude_is_wrapped_past_antimeridian() {
        let view = test_view();
        let world_width = 2.0 * std::f64::consts::PI * hazard_map_types::projection::WGS84_SEMIMAJOR;
        let panned = view.translate(Vector2d::new(-world_width / view.resolution(), 0.0));

        let center = panned
            .screen_to_latlon(&Point2d::new(400.0, 300.0))
            .expect("invalid point");
        assert_relative_eq!(center.lon(), 123.3, epsilon = 1e-6);
        assert_relative_eq!(center.lat(), 9.3, epsilon = 1e-9);
    }

    #[test]
    fn zoom_keeps_base_point() {
        let view = test_view();
        let base = Point2d::new(100.0, 100.0);
        let before = view.screen_to_map(&base);
        let zoomed = view.zoom(0.5, base);
        let after = zoomed.screen_to_map(&base);

        assert_relative_eq!(zoomed.resolution(), 50.0);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-6);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-6);
    }

    #[test]
    fn translate_follows_pointer() {
        let view = test_view();
        let px = Point2d::new(200.0, 200.0);
        let point = view.screen_to_map(&px);
        let moved = view.translate(Vector2d::new(10.0, -20.0));
        let new_px = moved.map_to_screen(&point);

        assert_relative_eq!(new_px.x, 210.0, epsilon = 1e-9);
        assert_relative_eq!(new_px.y, 180.0, epsilon = 1e-9);
    }
}
