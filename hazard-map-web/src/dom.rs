//! [`DomView`] writes the application state into the page elements.
//!
//! Ids of the elements the page is expected to have:
//!
//! | Id | Element |
//! |----|---------|
//! | `map-canvas` | `<canvas>` the map is drawn to |
//! | `flood-toggle`, `landslide-toggle`, `liquefaction-toggle` | layer visibility checkboxes |
//! | `location-panel` | panel with the selected location, hidden until the first click |
//! | `coordinates` | coordinates of the selected location |
//! | `hazard-details` | hazard details of the selected location |
//! | `feature-popup` | popup of the clicked hazard polygon |
//! | `upload-form` | upload form |
//! | `shapefile-input` | file input of the upload form |
//! | `dataset-type` | dataset type select of the upload form |
//! | `upload-submit` | submit button of the upload form |
//! | `upload-progress` | progress indicator |
//! | `upload-result`, `upload-message`, `upload-dismiss` | upload result panel, its text and close button |
//! | `search-input`, `search-button` | location search |
//! | `dataset-list` | list of uploaded datasets |
//!
//! Missing elements are skipped.

use std::time::Duration;

use hazard_map::inspect::HazardDetail;
use hazard_map::layer::Popup;
use hazard_map::upload::UploadState;
use hazard_map::{DatasetInfo, HazardKind, ViewBinding};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, Window};

/// Id of the map canvas.
pub const MAP_CANVAS: &str = "map-canvas";
/// Id of the location panel.
pub const LOCATION_PANEL: &str = "location-panel";
/// Id of the coordinates text.
pub const COORDINATES: &str = "coordinates";
/// Id of the hazard details container.
pub const HAZARD_DETAILS: &str = "hazard-details";
/// Id of the feature popup.
pub const FEATURE_POPUP: &str = "feature-popup";
/// Id of the upload form.
pub const UPLOAD_FORM: &str = "upload-form";
/// Id of the shapefile input.
pub const SHAPEFILE_INPUT: &str = "shapefile-input";
/// Id of the dataset type select.
pub const DATASET_TYPE: &str = "dataset-type";
/// Id of the upload submit button.
pub const UPLOAD_SUBMIT: &str = "upload-submit";
/// Id of the upload progress indicator.
pub const UPLOAD_PROGRESS: &str = "upload-progress";
/// Id of the upload result panel.
pub const UPLOAD_RESULT: &str = "upload-result";
/// Id of the upload result text.
pub const UPLOAD_MESSAGE: &str = "upload-message";
/// Id of the upload result close button.
pub const UPLOAD_DISMISS: &str = "upload-dismiss";
/// Id of the search input.
pub const SEARCH_INPUT: &str = "search-input";
/// Id of the search button.
pub const SEARCH_BUTTON: &str = "search-button";
/// Id of the dataset list.
pub const DATASET_LIST: &str = "dataset-list";

/// Id of the visibility checkbox of the layer.
pub fn toggle_id(kind: HazardKind) -> String {
    format!("{}-toggle", kind.as_str())
}

/// Returns the element with the id cast to the type `T`.
pub fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let element = document.get_element_by_id(id);
    if element.is_none() {
        log::debug!("Element #{id} is not found");
    }

    element?.dyn_into::<T>().ok()
}

/// [`ViewBinding`] on top of the page DOM.
pub struct DomView {
    window: Window,
    document: Document,
}

impl DomView {
    /// Creates a view for the document of the window.
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn element<T: JsCast>(&self, id: &str) -> Option<T> {
        element(&self.document, id)
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(element) = self.element::<HtmlElement>(id) {
            element.set_hidden(hidden);
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.element::<Element>(id) {
            element.set_text_content(Some(text));
        }
    }

    fn append_child(&self, parent: &Element, tag: &str, class: Option<&str>, text: &str) {
        let Ok(child) = self.document.create_element(tag) else {
            log::warn!("Failed to create <{tag}> element");
            return;
        };

        if let Some(class) = class {
            child.set_class_name(class);
        }
        child.set_text_content(Some(text));
        if let Err(err) = parent.append_child(&child) {
            log::warn!("Failed to add <{tag}> element: {err:?}");
        }
    }
}

impl ViewBinding for DomView {
    fn show_location_panel(&mut self) {
        self.set_hidden(LOCATION_PANEL, false);
    }

    fn set_coordinates(&mut self, text: &str) {
        self.set_text(COORDINATES, text);
    }

    fn set_hazard_details(&mut self, details: &[HazardDetail], note: Option<&str>) {
        let Some(container) = self.element::<Element>(HAZARD_DETAILS) else {
            return;
        };

        container.set_text_content(None);
        for detail in details {
            self.append_child(&container, "p", Some("hazard-detail"), &detail.text());
        }
        if let Some(note) = note {
            self.append_child(&container, "p", Some("hazard-note"), note);
        }
    }

    fn show_popup(&mut self, popup: &Popup) {
        let Some(container) = self.element::<HtmlElement>(FEATURE_POPUP) else {
            return;
        };

        container.set_text_content(None);
        self.append_child(&container, "h4", None, popup.title());
        for line in popup.lines() {
            self.append_child(
                &container,
                "p",
                None,
                &format!("{}: {}", line.label, line.value),
            );
        }
        container.set_hidden(false);
    }

    fn hide_popup(&mut self) {
        self.set_hidden(FEATURE_POPUP, true);
    }

    fn set_layer_toggle(&mut self, kind: HazardKind, checked: bool) {
        if let Some(input) = self.element::<HtmlInputElement>(&toggle_id(kind)) {
            input.set_checked(checked);
        }
    }

    fn set_upload_state(&mut self, state: &UploadState) {
        let (form, progress, result) = match state {
            UploadState::Idle => (true, false, false),
            UploadState::InProgress => (false, true, false),
            UploadState::Succeeded(_) | UploadState::Failed(_) => (false, false, true),
        };

        self.set_hidden(UPLOAD_FORM, !form);
        self.set_hidden(UPLOAD_PROGRESS, !progress);
        self.set_hidden(UPLOAD_RESULT, !result);

        if let Some(button) = self.element::<HtmlButtonElement>(UPLOAD_SUBMIT) {
            button.set_disabled(!state.can_submit());
        }

        match state {
            UploadState::Succeeded(message) | UploadState::Failed(message) => {
                self.set_text(UPLOAD_MESSAGE, message);
                if let Some(element) = self.element::<Element>(UPLOAD_MESSAGE) {
                    let class = if matches!(state, UploadState::Succeeded(_)) {
                        "success"
                    } else {
                        "error"
                    };
                    element.set_class_name(class);
                }
            }
            _ => self.set_text(UPLOAD_MESSAGE, ""),
        }
    }

    fn alert(&mut self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("Failed to show alert: {err:?}");
        }
    }

    fn schedule_reload(&mut self, delay: Duration) {
        let reload = Closure::once_into_js(|| {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().reload() {
                    log::warn!("Failed to reload the page: {err:?}");
                }
            }
        });

        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                reload.unchecked_ref(),
                delay.as_millis() as i32,
            )
        {
            log::warn!("Failed to schedule page reload: {err:?}");
        }
    }

    fn set_datasets(&mut self, datasets: &[DatasetInfo]) {
        let Some(list) = self.element::<Element>(DATASET_LIST) else {
            return;
        };

        list.set_text_content(None);
        for dataset in datasets {
            self.append_child(
                &list,
                "li",
                Some(dataset.dataset_type.as_str()),
                &format!(
                    "{} ({}, uploaded {})",
                    dataset.name, dataset.file_name, dataset.upload_date
                ),
            );
        }
    }
}
