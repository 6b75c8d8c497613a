//! [`Map`] owns the hazard layers, the selection marker and the current view.

use std::time::Duration;

use hazard_map_types::{GeoPoint2d, Size};
use web_time::SystemTime;

use crate::color::Color;
use crate::inspect::SelectionMarker;
use crate::layer::Popup;
use crate::messenger::Messenger;
use crate::render::{Canvas, PointPaint};
use crate::view::MapView;

mod layer_collection;

pub use layer_collection::LayerCollection;

const FRAME_DURATION: Duration = Duration::from_millis(16);
const MARKER_PAINT: PointPaint = PointPaint {
    color: Color::from_hex("#2A81CB"),
    outline: Color::WHITE,
    size: 12.0,
};

/// Map specifies the hazard layers, the selection marker and the view that should be rendered.
pub struct Map {
    view: MapView,
    layers: LayerCollection,
    marker: Option<SelectionMarker>,
    messenger: Option<Box<dyn Messenger>>,
    animation: Option<AnimationParameters>,
}

struct AnimationParameters {
    start_view: MapView,
    end_view: MapView,
    start_time: SystemTime,
    duration: Duration,
}

impl Map {
    /// Creates a new map with empty layers.
    pub fn new(view: MapView, messenger: Option<Box<dyn Messenger>>) -> Self {
        Self {
            view,
            layers: LayerCollection::default(),
            marker: None,
            messenger,
            animation: None,
        }
    }

    /// Current view of the map.
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Changes the view of the map to the given one.
    pub fn set_view(&mut self, view: MapView) {
        self.view = view;
        self.redraw();
    }

    /// Sets the size of the screen the map is drawn to.
    pub fn set_size(&mut self, size: Size) {
        self.view = self.view.with_size(size);
        if let Some(animation) = &mut self.animation {
            animation.end_view = animation.end_view.with_size(size);
        }
        self.redraw();
    }

    /// Hazard layers of the map.
    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    /// Mutable hazard layers of the map. Call [`Map::redraw`] after changing them.
    pub fn layers_mut(&mut self) -> &mut LayerCollection {
        &mut self.layers
    }

    /// Places the selection marker at the point, removing the previous one.
    pub fn place_marker(&mut self, position: GeoPoint2d) {
        self.marker = Some(SelectionMarker::new(position));
        self.redraw();
    }

    /// Current selection marker.
    pub fn marker(&self) -> Option<&SelectionMarker> {
        self.marker.as_ref()
    }

    /// Requests redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw()
        }
    }

    /// Target view of the current animation.
    pub fn target_view(&self) -> &MapView {
        self.animation
            .as_ref()
            .map(|v| &v.end_view)
            .unwrap_or(&self.view)
    }

    /// Requests a gradual change of the map view to the specified view.
    pub fn animate_to(&mut self, target: MapView, duration: Duration) {
        self.animation = Some(AnimationParameters {
            start_view: self.view,
            end_view: target,
            start_time: SystemTime::now() - FRAME_DURATION,
            duration,
        });
        self.animate();
    }

    /// Updates the view before rendering in case [`Map::animate_to`] was called.
    pub fn animate(&mut self) {
        let Some(animation) = &self.animation else {
            return;
        };

        let elapsed = SystemTime::now()
            .duration_since(animation.start_time)
            .unwrap_or_default();
        let k = if animation.duration.is_zero() {
            1.0
        } else {
            elapsed.as_secs_f64() / animation.duration.as_secs_f64()
        };

        if k >= 1.0 {
            self.view = animation.end_view;
            self.animation = None;
        } else {
            self.view = animation.start_view.interpolate(&animation.end_view, k);
        }

        self.redraw();
    }

    /// Draws visible layers and the selection marker to the canvas.
    pub fn render(&self, canvas: &mut dyn Canvas) {
        canvas.clear();

        for layer in self.layers.iter_visible() {
            layer.render(&self.view, canvas);
        }

        if let Some(marker) = &self.marker {
            if let Some(position) = self.view.latlon_to_screen(&marker.position()) {
                canvas.draw_point(position, &MARKER_PAINT);
            }
        }
    }

    /// Popups of the visible features containing the point, the topmost first.
    pub fn popups_at<'a>(&'a self, point: &'a GeoPoint2d) -> Vec<&'a Popup> {
        self.layers
            .iter_visible()
            .rev()
            .flat_map(|layer| {
                layer
                    .features_at(point)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
            })
            .map(|rendered| rendered.popup())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::HazardKind;
    use crate::layer::{HazardFeatureCollection, HazardSymbol};
    use crate::tests::{feature_collection_json, CountingMessenger, RecordingCanvas};

    fn test_map() -> Map {
        let view = MapView::new(&GeoPoint2d::latlon(9.5, 123.5), 100.0)
            .with_size(Size::new(200.0, 200.0));
        let mut map = Map::new(view, None);

        for (kind, code) in [(HazardKind::Flood, "HS"), (HazardKind::Landslide, "LS")] {
            let json = feature_collection_json(&[(123.0, 9.0, Some(code), code, None)]);
            let data = HazardFeatureCollection::from_geojson(kind, json.as_bytes())
                .expect("invalid collection");
            map.layers_mut()
                .get_mut(kind)
                .render_collection(data, &HazardSymbol);
        }

        map
    }

    #[test]
    fn marker_is_replaced() {
        let mut map = test_map();
        assert!(map.marker().is_none());

        map.place_marker(GeoPoint2d::latlon(1.0, 2.0));
        map.place_marker(GeoPoint2d::latlon(3.0, 4.0));

        assert_eq!(
            map.marker().map(|m| m.position()),
            Some(GeoPoint2d::latlon(3.0, 4.0))
        );
    }

    #[test]
    fn render_skips_hidden_layers() {
        let mut map = test_map();
        let mut canvas = RecordingCanvas::new(Size::new(200.0, 200.0));
        map.render(&mut canvas);
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.polygons.len(), 2);

        map.layers_mut().hide(HazardKind::Flood);
        let mut canvas = RecordingCanvas::new(Size::new(200.0, 200.0));
        map.render(&mut canvas);
        assert_eq!(canvas.polygons.len(), 1);
    }

    #[test]
    fn render_draws_marker_last() {
        let mut map = test_map();
        map.place_marker(GeoPoint2d::latlon(9.5, 123.5));

        let mut canvas = RecordingCanvas::new(Size::new(200.0, 200.0));
        map.render(&mut canvas);
        assert_eq!(canvas.points.len(), 1);
        assert!((canvas.points[0].x - 100.0).abs() < 1e-6);
        assert!((canvas.points[0].y - 100.0).abs() < 1e-6);
    }

    #[test]
    fn popups_topmost_first() {
        let mut map = test_map();
        let point = GeoPoint2d::latlon(9.5, 123.5);

        let titles: Vec<_> = map.popups_at(&point).iter().map(|p| p.title()).collect();
        assert_eq!(
            titles,
            vec!["Landslide Susceptibility", "Flood Susceptibility"]
        );

        map.layers_mut().hide(HazardKind::Landslide);
        let titles: Vec<_> = map.popups_at(&point).iter().map(|p| p.title()).collect();
        assert_eq!(titles, vec!["Flood Susceptibility"]);
    }

    #[test]
    fn set_view_requests_redraw() {
        let messenger = CountingMessenger::default();
        let mut map = Map::new(MapView::default(), Some(Box::new(messenger.clone())));
        map.set_view(MapView::default().with_resolution(10.0));
        map.place_marker(GeoPoint2d::latlon(0.0, 0.0));

        assert_eq!(messenger.count(), 2);
    }

    #[test]
    fn zero_duration_animation_finishes_immediately() {
        let mut map = test_map();
        let target = map.view().with_resolution(10.0);
        map.animate_to(target, Duration::ZERO);

        assert_eq!(map.view().resolution(), 10.0);
        assert_eq!(map.target_view().resolution(), 10.0);
    }
}
