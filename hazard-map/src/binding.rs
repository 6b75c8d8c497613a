//! [`ViewBinding`] connects the application state to the user interface controls.

use std::time::Duration;

use crate::hazard::HazardKind;
use crate::inspect::HazardDetail;
use crate::layer::Popup;
use crate::loader::DatasetInfo;
use crate::upload::UploadState;

/// User interface controls the application writes to.
///
/// The application never reads from the controls, all input comes through the event handler methods of
/// [`HazardMapApp`](crate::HazardMapApp).
pub trait ViewBinding {
    /// Makes the location panel visible.
    fn show_location_panel(&mut self);
    /// Sets the coordinates text of the location panel.
    fn set_coordinates(&mut self, text: &str);
    /// Replaces the hazard details of the location panel.
    fn set_hazard_details(&mut self, details: &[HazardDetail], note: Option<&str>);
    /// Shows a popup at the clicked location.
    fn show_popup(&mut self, popup: &Popup);
    /// Closes the popup, if one is open.
    fn hide_popup(&mut self);
    /// Sets the checked state of a layer toggle.
    fn set_layer_toggle(&mut self, kind: HazardKind, checked: bool);
    /// Switches the upload panel to the state: form, progress indicator or result message.
    fn set_upload_state(&mut self, state: &UploadState);
    /// Shows a blocking message.
    fn alert(&mut self, message: &str);
    /// Reloads the whole page after the delay.
    fn schedule_reload(&mut self, delay: Duration);
    /// Shows the list of uploaded datasets.
    fn set_datasets(&mut self, datasets: &[DatasetInfo]);
}
