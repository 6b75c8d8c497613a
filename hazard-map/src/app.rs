//! [`HazardMapApp`] is the state of the hazard map application and the entry point of all user interactions.

use hazard_map_types::{GeoPoint2d, Size};

use crate::binding::ViewBinding;
use crate::config::HazardMapConfig;
use crate::control::{EventProcessor, MapController, MouseButton, RawUserEvent, UserEvent};
use crate::error::HazardMapError;
use crate::hazard::HazardKind;
use crate::inspect;
use crate::layer::{HazardFeatureCollection, HazardSymbol};
use crate::loader::DatasetInfo;
use crate::map::Map;
use crate::messenger::Messenger;
use crate::platform::HttpResponse;
use crate::render::Canvas;
use crate::search;
use crate::upload::{PendingUpload, UploadFlow, UploadForm, UploadState};
use crate::view::MapView;

/// Handlers of the user actions the map page reacts to.
pub trait MapEventHandler {
    /// The user clicked the map at the given point.
    fn on_map_click(&mut self, point: GeoPoint2d);
    /// A layer toggle was checked or unchecked.
    fn on_toggle_change(&mut self, kind: HazardKind, checked: bool);
    /// The upload form was submitted.
    ///
    /// Returns the upload to send if the form is valid and no other upload is in progress. The result of sending it
    /// must be given back to [`HazardMapApp::on_upload_finished`].
    fn on_form_submit(&mut self, form: UploadForm) -> Option<PendingUpload>;
}

/// State of the hazard map application.
///
/// The app owns the map with its layers and marker, the upload state machine and the view binding it reports to.
/// Network requests are made outside of the app: the caller sends them with a
/// [`HazardDataLoader`](crate::HazardDataLoader) or a [`PendingUpload`] and hands the results back, so the app is
/// never borrowed across an `await`.
pub struct HazardMapApp<V: ViewBinding> {
    config: HazardMapConfig,
    map: Map,
    symbol: HazardSymbol,
    upload: UploadFlow,
    events: EventProcessor,
    datasets: Vec<DatasetInfo>,
    view: V,
}

impl<V: ViewBinding> HazardMapApp<V> {
    /// Creates the app with empty layers and initializes the view controls.
    pub fn new(config: HazardMapConfig, view: V, messenger: Option<Box<dyn Messenger>>) -> Self {
        let map_view = MapView::new(&config.center, config.resolution);
        let mut events = EventProcessor::default();
        events.add_handler(MapController::default());

        let mut app = Self {
            config,
            map: Map::new(map_view, messenger),
            symbol: HazardSymbol,
            upload: UploadFlow::default(),
            events,
            datasets: vec![],
            view,
        };

        for kind in HazardKind::ALL {
            let visible = app.map.layers().is_visible(kind);
            app.view.set_layer_toggle(kind, visible);
        }
        app.view.set_upload_state(app.upload.state());

        app
    }

    /// Configuration of the app.
    pub fn config(&self) -> &HazardMapConfig {
        &self.config
    }

    /// The map.
    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable map.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// The view binding.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Current state of the upload panel.
    pub fn upload_state(&self) -> &UploadState {
        self.upload.state()
    }

    /// Datasets reported by the backend.
    pub fn datasets(&self) -> &[DatasetInfo] {
        &self.datasets
    }

    /// Applies the result of loading one hazard dataset. Data replaces the contents of the layer, a failure leaves
    /// the layer as it is.
    pub fn apply_dataset(
        &mut self,
        kind: HazardKind,
        result: Result<HazardFeatureCollection, HazardMapError>,
    ) {
        let layer = self.map.layers_mut().get_mut(kind);
        match result {
            Ok(collection) => {
                let count = layer.render_collection(collection, &self.symbol);
                log::info!("Rendered {count} {kind} features");
            }
            Err(err) => {
                log::warn!("{kind} layer stays empty: {err}");
                layer.mark_failed();
            }
        }

        self.map.redraw();
    }

    /// Applies the loaded list of datasets.
    pub fn apply_datasets(&mut self, result: Result<Vec<DatasetInfo>, HazardMapError>) {
        match result {
            Ok(datasets) => {
                self.datasets = datasets;
                self.view.set_datasets(&self.datasets);
            }
            Err(err) => log::warn!("Failed to load the list of datasets: {err}"),
        }
    }

    /// Processes a pointer event on the map. Drags and scrolls move the map, a click inspects the location.
    pub fn handle_raw_event(&mut self, event: RawUserEvent) {
        let unhandled = self.events.handle(event, &mut self.map);
        for event in unhandled {
            if let UserEvent::Click(MouseButton::Left, mouse_event) = event {
                match mouse_event.map_pointer_position {
                    Some(point) => self.on_map_click(point),
                    None => log::debug!("Click outside of the projection bounds is ignored"),
                }
            }
        }
    }

    /// Applies the result of a sent [`PendingUpload`]. A successful upload schedules a page reload.
    pub fn on_upload_finished(&mut self, result: Result<HttpResponse, HazardMapError>) {
        let succeeded = self.upload.finish(result);
        self.view.set_upload_state(self.upload.state());

        if succeeded {
            self.view.schedule_reload(self.config.reload_delay());
        }
    }

    /// Closes the upload result and shows the form again.
    pub fn on_upload_dismiss(&mut self) {
        self.upload.dismiss();
        self.view.set_upload_state(self.upload.state());
    }

    /// Runs a location search.
    pub fn on_search(&mut self, query: &str) {
        if let Some(notice) = search::search(query) {
            self.view.alert(notice);
        }
    }

    /// Sets the size of the map area.
    pub fn resize(&mut self, size: Size) {
        self.map.set_size(size);
    }

    /// Draws the map.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        self.map.animate();
        self.map.render(canvas);
    }
}

impl<V: ViewBinding> MapEventHandler for HazardMapApp<V> {
    fn on_map_click(&mut self, point: GeoPoint2d) {
        self.map.place_marker(point);

        self.view.show_location_panel();
        self.view.set_coordinates(&inspect::format_coordinates(&point));

        let details = inspect::lookup(self.map.layers(), &point);
        self.view
            .set_hazard_details(&details, inspect::details_note(&details));

        match self.map.popups_at(&point).first() {
            Some(popup) => self.view.show_popup(popup),
            None => self.view.hide_popup(),
        }
    }

    fn on_toggle_change(&mut self, kind: HazardKind, checked: bool) {
        self.map.layers_mut().set_visible(kind, checked);
        self.map.redraw();
    }

    fn on_form_submit(&mut self, form: UploadForm) -> Option<PendingUpload> {
        match self.upload.begin(form) {
            Ok(request) => {
                self.view.set_upload_state(self.upload.state());
                Some(PendingUpload::new(self.config.upload_url(), request))
            }
            Err(err @ (HazardMapError::UploadInProgress | HazardMapError::UploadNotDismissed)) => {
                log::debug!("Upload submission ignored: {err}");
                None
            }
            Err(err) => {
                self.view.alert(&err.to_string());
                None
            }
        }
    }
}
