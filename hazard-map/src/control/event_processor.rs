use hazard_map_types::{Point2d, Vector2d};

use crate::control::{
    EventPropagation, MouseButtonsState, MouseEvent, RawUserEvent, UserEvent, UserEventHandler,
};
use crate::map::Map;

const DRAG_THRESHOLD: f64 = 3.0;

/// Converts [`RawUserEvent`]s into [`UserEvent`]s and dispatches them to the handlers.
#[derive(Default)]
pub struct EventProcessor {
    handlers: Vec<Box<dyn UserEventHandler>>,
    pointer_position: Point2d,
    pointer_pressed_position: Point2d,
    buttons_state: MouseButtonsState,
    dragged_since_press: bool,
    drag_target: Option<usize>,
}

impl EventProcessor {
    /// Adds a handler to the end of the handler list.
    pub fn add_handler(&mut self, handler: impl UserEventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Processes the raw event. Returns the user events that were not stopped or consumed by any handler.
    pub fn handle(&mut self, event: RawUserEvent, map: &mut Map) -> Vec<UserEvent> {
        let mut unhandled = vec![];

        for user_event in self.process(event, map) {
            let mut drag_start_target = None;
            let mut propagated = true;

            for (index, handler) in self.handlers.iter().enumerate() {
                if matches!(user_event, UserEvent::Drag(..) | UserEvent::DragEnded(..))
                    && self.drag_target != Some(index)
                {
                    continue;
                }

                match handler.handle(&user_event, map) {
                    EventPropagation::Propagate => {}
                    EventPropagation::Stop => {
                        propagated = false;
                        break;
                    }
                    EventPropagation::Consume => {
                        if let UserEvent::DragStarted(..) = user_event {
                            drag_start_target = Some(index);
                        }
                        propagated = false;
                        break;
                    }
                }
            }

            if drag_start_target.is_some() {
                self.drag_target = drag_start_target;
            }

            if propagated {
                unhandled.push(user_event);
            }
        }

        unhandled
    }

    fn process(&mut self, event: RawUserEvent, map: &Map) -> Vec<UserEvent> {
        match event {
            RawUserEvent::ButtonPressed(button) => {
                self.buttons_state.set_pressed(button);
                self.pointer_pressed_position = self.pointer_position;
                self.dragged_since_press = false;

                vec![UserEvent::ButtonPressed(button, self.mouse_event(map))]
            }
            RawUserEvent::ButtonReleased(button) => {
                // Releases are reported for the whole page, not only for presses that started on the map.
                if !self.buttons_state.is_pressed(button) {
                    return vec![];
                }

                self.buttons_state.set_released(button);
                let mut events = vec![UserEvent::ButtonReleased(button, self.mouse_event(map))];

                if self.dragged_since_press {
                    if self.drag_target.take().is_some() {
                        events.push(UserEvent::DragEnded(button, self.mouse_event(map)));
                    }
                } else {
                    events.push(UserEvent::Click(button, self.mouse_event(map)));
                }

                self.dragged_since_press = false;
                events
            }
            RawUserEvent::PointerMoved(position) => {
                let prev_position = self.pointer_position;
                self.pointer_position = position;

                let mut events = vec![UserEvent::PointerMoved(self.mouse_event(map))];
                if let Some(button) = self.buttons_state.single_pressed() {
                    if !self.dragged_since_press
                        && taxicab_distance(&position, &self.pointer_pressed_position)
                            > DRAG_THRESHOLD
                    {
                        self.dragged_since_press = true;
                        events.push(UserEvent::DragStarted(
                            button,
                            self.mouse_event_at(map, self.pointer_pressed_position),
                        ));
                        // The first drag event covers the whole distance from the press position.
                        events.push(UserEvent::Drag(
                            button,
                            position - self.pointer_pressed_position,
                            self.mouse_event(map),
                        ));
                    } else if self.dragged_since_press {
                        events.push(UserEvent::Drag(
                            button,
                            position - prev_position,
                            self.mouse_event(map),
                        ));
                    }
                }

                events
            }
            RawUserEvent::Scroll(delta) => vec![UserEvent::Scroll(delta, self.mouse_event(map))],
        }
    }

    fn mouse_event(&self, map: &Map) -> MouseEvent {
        self.mouse_event_at(map, self.pointer_position)
    }

    fn mouse_event_at(&self, map: &Map, screen_pointer_position: Point2d) -> MouseEvent {
        MouseEvent {
            screen_pointer_position,
            map_pointer_position: map.view().screen_to_latlon(&screen_pointer_position),
            buttons: self.buttons_state,
        }
    }
}

fn taxicab_distance(a: &Point2d, b: &Point2d) -> f64 {
    let delta: Vector2d = a - b;
    delta.x.abs() + delta.y.abs()
}
