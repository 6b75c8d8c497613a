//! Notifications from the map to the application.

use maybe_sync::{MaybeSend, MaybeSync};

/// Messenger is used by the map to notify the application that the screen should be updated.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests the map to be drawn again.
    fn request_redraw(&self);
}
