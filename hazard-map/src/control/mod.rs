//! User interaction with the map.
//!
//! Interaction is handled in several steps:
//! 1. A platform event is converted to a [`RawUserEvent`] by the platform binding.
//! 2. The [`EventProcessor`] keeps track of the pointer and button state and turns raw events into [`UserEvent`]s:
//!    clicks, drags and scrolls.
//! 3. The event processor gives every user event to its [`UserEventHandler`]s (for example [`MapController`], which
//!    pans and zooms the map). Events that no handler stopped are returned to the application.

use hazard_map_types::{GeoPoint2d, Point2d, Vector2d};
use maybe_sync::{MaybeSend, MaybeSync};

use crate::map::Map;

mod event_processor;
mod map;

pub use event_processor::EventProcessor;
pub use map::{MapController, MapControllerConfiguration};

/// User input handler.
pub trait UserEventHandler: MaybeSend + MaybeSync {
    /// Handle the event.
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation;
}

impl<T: for<'a> Fn(&'a UserEvent, &'a mut Map) -> EventPropagation> UserEventHandler for T
where
    T: MaybeSync + MaybeSend,
{
    fn handle(&self, event: &UserEvent, map: &mut Map) -> EventPropagation {
        self(event, map)
    }
}

/// Raw user interaction event, as reported by the platform. It carries no input state, the state is tracked by the
/// [`EventProcessor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawUserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton),
    /// A mouse button was released.
    ButtonReleased(MouseButton),
    /// Mouse pointer was moved to the given screen pixel position.
    PointerMoved(Point2d),
    /// Scroll by the given number of lines. Positive values scroll down (zoom out).
    Scroll(f64),
}

/// User interaction event given to [`UserEventHandler`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// A mouse button was pressed.
    ButtonPressed(MouseButton, MouseEvent),
    /// A mouse button was released.
    ButtonReleased(MouseButton, MouseEvent),
    /// A mouse button was released without the pointer being dragged since the press.
    Click(MouseButton, MouseEvent),
    /// Mouse pointer moved.
    PointerMoved(MouseEvent),
    /// The pointer moved beyond the drag threshold while a single button is pressed.
    DragStarted(MouseButton, MouseEvent),
    /// Pointer moved by the given screen delta after drag started was consumed.
    Drag(MouseButton, Vector2d, MouseEvent),
    /// Mouse button was released while dragging.
    DragEnded(MouseButton, MouseEvent),
    /// Scroll by the given number of lines.
    Scroll(f64, MouseEvent),
}

/// Value returned by an [`UserEventHandler`] to indicate the status of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
    /// Event should not be propagated, and the current handler becomes the owner of the drag started by a
    /// [`UserEvent::DragStarted`] event.
    Consume,
}

/// Mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// Any other button.
    Other,
}

/// State of the mouse at the moment of the event.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// Pointer position on the screen in pixels from the top-left corner.
    pub screen_pointer_position: Point2d,
    /// Geographic position under the pointer.
    pub map_pointer_position: Option<GeoPoint2d>,
    /// State of the mouse buttons.
    pub buttons: MouseButtonsState,
}

/// State of a mouse button.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MouseButtonState {
    /// Button is pressed.
    Pressed,
    /// Button is not pressed.
    #[default]
    Released,
}

/// State of all mouse buttons.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct MouseButtonsState {
    /// State of the left mouse button.
    pub left: MouseButtonState,
    /// State of the middle mouse button.
    pub middle: MouseButtonState,
    /// State of the right mouse button.
    pub right: MouseButtonState,
}

impl MouseButtonsState {
    pub(crate) fn set_pressed(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Pressed);
    }

    pub(crate) fn set_released(&mut self, button: MouseButton) {
        self.set_state(button, MouseButtonState::Released);
    }

    pub(crate) fn is_pressed(&self, button: MouseButton) -> bool {
        let state = match button {
            MouseButton::Left => self.left,
            MouseButton::Middle => self.middle,
            MouseButton::Right => self.right,
            MouseButton::Other => return false,
        };
        state == MouseButtonState::Pressed
    }

    fn set_state(&mut self, button: MouseButton, state: MouseButtonState) {
        match button {
            MouseButton::Left => self.left = state,
            MouseButton::Middle => self.middle = state,
            MouseButton::Right => self.right = state,
            MouseButton::Other => {}
        }
    }

    fn single_pressed(&self) -> Option<MouseButton> {
        let pressed: Vec<_> = [
            (self.left, MouseButton::Left),
            (self.middle, MouseButton::Middle),
            (self.right, MouseButton::Right),
        ]
        .into_iter()
        .filter(|(state, _)| *state == MouseButtonState::Pressed)
        .map(|(_, button)| button)
        .collect();

        match pressed.as_slice() {
            [button] => Some(*button),
            _ => None,
        }
    }
}
