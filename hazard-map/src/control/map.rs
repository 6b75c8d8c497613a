use std::time::Duration;

use crate::control::{EventPropagation, MouseButton, UserEvent, UserEventHandler};
use crate::map::Map;
use crate::view::MapView;

const DEFAULT_ZOOM_DURATION: Duration = Duration::from_millis(50);
const TOP_RESOLUTION: f64 = 156543.03392800014;

/// Configuration of a [`MapController`].
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct MapControllerConfiguration {
    zoom_duration: Duration,
    zoom_speed: f64,
    min_resolution: f64,
    max_resolution: f64,
}

impl Default for MapControllerConfiguration {
    fn default() -> Self {
        Self {
            zoom_duration: DEFAULT_ZOOM_DURATION,
            zoom_speed: 0.2,
            max_resolution: TOP_RESOLUTION / 4.0,
            min_resolution: TOP_RESOLUTION / 2.0f64.powi(19),
        }
    }
}

impl MapControllerConfiguration {
    /// Duration of the zoom animation when mouse wheel is turned.
    pub fn zoom_duration(&self) -> Duration {
        self.zoom_duration
    }

    /// Sets duration of the zoom animation when mouse wheel is turned.
    pub fn with_zoom_duration(mut self, duration: Duration) -> Self {
        self.zoom_duration = duration;
        self
    }

    /// Magnitude of the zoom on every mouse wheel turn.
    ///
    /// For example, the value of `0.2` means that every time the mouse wheel is turned, the map is zoomed by 0.2
    /// times.
    pub fn zoom_speed(&self) -> f64 {
        self.zoom_speed
    }

    /// Sets magnitude of the zoom on every mouse wheel turn.
    pub fn with_zoom_speed(mut self, speed: f64) -> Self {
        self.zoom_speed = speed;
        self
    }

    /// Minimum allowed resolution (the closest zoom).
    pub fn min_resolution(&self) -> f64 {
        self.min_resolution
    }

    /// Sets minimum allowed resolution.
    pub fn with_min_resolution(mut self, resolution: f64) -> Self {
        self.min_resolution = resolution;
        self
    }

    /// Maximum allowed resolution (the farthest zoom).
    pub fn max_resolution(&self) -> f64 {
        self.max_resolution
    }

    /// Sets maximum allowed resolution.
    pub fn with_max_resolution(mut self, resolution: f64) -> Self {
        self.max_resolution = resolution;
        self
    }
}

/// Event handler of a map, providing panning and zooming.
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct MapController {
    config: MapControllerConfiguration,
}

impl MapController {
    /// Creates a new instance of `MapController` with the given configuration.
    pub fn new(config: MapControllerConfiguration) -> Self {
        Self { config }
    }

    /// Returns the current configuration of the controller.
    pub fn config(&self) -> MapControllerConfiguration {
        self.config
    }

    fn get_zoom(&self, delta: f64) -> f64 {
        (self.config.zoom_speed + 1.0).powf(delta)
    }

    fn adjust_target_view(&self, mut target: MapView) -> MapView {
        if target.resolution() < self.config.min_resolution {
            target = target.with_resolution(self.config.min_resolution);
        }

        if target.resolution() > self.config.max_resolution {
            target = target.with_resolution(self.config.max_resolution);
        }

        target
    }
}

impl UserEventHandler for MapController {
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        match event {
            UserEvent::DragStarted(MouseButton::Left | MouseButton::Other, _) => {
                EventPropagation::Consume
            }
            UserEvent::Drag(MouseButton::Left | MouseButton::Other, delta, _) => {
                let target = map.view().translate(*delta);
                map.set_view(self.adjust_target_view(target));
                EventPropagation::Stop
            }
            UserEvent::Scroll(delta, mouse_event) => {
                let zoom = self.get_zoom(*delta);
                let target = map
                    .target_view()
                    .zoom(zoom, mouse_event.screen_pointer_position);
                let adjusted = self.adjust_target_view(target);
                map.animate_to(adjusted, self.config.zoom_duration);

                EventPropagation::Stop
            }
            _ => EventPropagation::Propagate,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use hazard_map_types::{latlon, Point2d, Size};

    use super::*;
    use crate::control::{MouseButtonsState, MouseEvent};

    #[test]
    fn min_resolution_is_adjusted() {
        let mut controller = MapController::default();
        let target = MapView::new(&latlon!(0.0, 0.0), controller.config.min_resolution / 2.0);
        let adjusted = controller.adjust_target_view(target);

        assert_relative_eq!(adjusted.resolution(), controller.config.min_resolution);

        controller.config.min_resolution = 10.0;
        let target = target.with_resolution(1.0);
        let adjusted = controller.adjust_target_view(target);
        assert_relative_eq!(adjusted.resolution(), controller.config.min_resolution);
    }

    #[test]
    fn max_resolution_is_adjusted() {
        let mut controller = MapController::default();
        let target = MapView::new(&latlon!(0.0, 0.0), controller.config.max_resolution * 2.0);
        let adjusted = controller.adjust_target_view(target);

        assert_relative_eq!(adjusted.resolution(), controller.config.max_resolution);

        controller.config.max_resolution = 10.0;
        let target = target.with_resolution(100.0);
        let adjusted = controller.adjust_target_view(target);
        assert_relative_eq!(adjusted.resolution(), controller.config.max_resolution);
    }

    #[test]
    fn scroll_down_zooms_out() {
        let controller = MapController::new(
            MapControllerConfiguration::default().with_zoom_duration(Duration::ZERO),
        );
        let view = MapView::new(&latlon!(9.3, 123.3), 100.0).with_size(Size::new(400.0, 300.0));
        let mut map = Map::new(view, None);

        let event = UserEvent::Scroll(
            1.0,
            MouseEvent {
                screen_pointer_position: Point2d::new(200.0, 150.0),
                map_pointer_position: None,
                buttons: MouseButtonsState::default(),
            },
        );
        let propagation = controller.handle(&event, &mut map);

        assert_eq!(propagation, EventPropagation::Stop);
        assert_relative_eq!(map.view().resolution(), 120.0);
    }
}
