use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use geo_types::{polygon, MultiPolygon};
use hazard_map_types::{HazardGeometry, Point2d, Size};

use crate::binding::ViewBinding;
use crate::color::Color;
use crate::error::HazardMapError;
use crate::hazard::HazardKind;
use crate::inspect::HazardDetail;
use crate::layer::Popup;
use crate::loader::DatasetInfo;
use crate::messenger::Messenger;
use crate::platform::{HttpResponse, PlatformService};
use crate::render::{Canvas, LinePaint, PointPaint, PolygonPaint};
use crate::upload::{UploadRequest, UploadState};

/// 1x1 degree square with the bottom-left corner at (`lon`, `lat`).
pub fn square(lon: f64, lat: f64) -> HazardGeometry {
    HazardGeometry::new(MultiPolygon(vec![polygon![
        (x: lon, y: lat),
        (x: lon + 1.0, y: lat),
        (x: lon + 1.0, y: lat + 1.0),
        (x: lon, y: lat + 1.0),
        (x: lon, y: lat),
    ]]))
}

/// GeoJSON feature collection of 1x1 degree squares given as
/// `(lon, lat, susceptibility, original_code, shape_area)`.
pub fn feature_collection_json(features: &[(f64, f64, Option<&str>, &str, Option<f64>)]) -> String {
    let features: Vec<_> = features
        .iter()
        .map(|(x, y, susceptibility, original_code, shape_area)| {
            let mut properties = serde_json::Map::new();
            if let Some(susceptibility) = susceptibility {
                properties.insert("susceptibility".into(), (*susceptibility).into());
            }
            properties.insert("original_code".into(), (*original_code).into());
            if let Some(area) = shape_area {
                properties.insert("shape_area".into(), (*area).into());
            }
            properties.insert("dataset_id".into(), 1.into());

            serde_json::json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [x, y], [x + 1.0, y], [x + 1.0, y + 1.0], [x, y + 1.0], [x, y]
                    ]]
                },
                "properties": properties,
            })
        })
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": features,
    })
    .to_string()
}

enum MockResponse {
    Body(Bytes),
    Status(u16, Bytes),
    Failure,
}

impl From<Result<String, HazardMapError>> for MockResponse {
    fn from(value: Result<String, HazardMapError>) -> Self {
        match value {
            Ok(body) => MockResponse::Body(body.into()),
            Err(HazardMapError::Status { status, body }) => MockResponse::Status(status, body),
            Err(_) => MockResponse::Failure,
        }
    }
}

impl MockResponse {
    fn to_result(&self) -> Result<HttpResponse, HazardMapError> {
        match self {
            MockResponse::Body(body) => Ok(HttpResponse {
                status: 200,
                body: body.clone(),
            }),
            MockResponse::Status(status, body) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            MockResponse::Failure => Err(HazardMapError::IO),
        }
    }
}

/// Platform service answering from preset responses. Unknown URLs fail with [`HazardMapError::IO`].
#[derive(Default)]
pub struct MockPlatform {
    responses: Mutex<HashMap<String, MockResponse>>,
    post_response: Mutex<Option<MockResponse>>,
    get_count: AtomicUsize,
    post_count: AtomicUsize,
}

impl MockPlatform {
    pub fn set_response(&self, url: &str, response: Result<String, HazardMapError>) {
        self.responses
            .lock()
            .expect("poisoned")
            .insert(url.to_string(), response.into());
    }

    pub fn set_post_response(&self, response: Result<HttpResponse, HazardMapError>) {
        let response = match response {
            Ok(HttpResponse { status, body }) => MockResponse::Status(status, body),
            Err(_) => MockResponse::Failure,
        };
        *self.post_response.lock().expect("poisoned") = Some(response);
    }

    pub fn get_count(&self) -> usize {
        self.get_count.load(Ordering::Relaxed)
    }

    pub fn post_count(&self) -> usize {
        self.post_count.load(Ordering::Relaxed)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl PlatformService for MockPlatform {
    async fn load_bytes_from_url(&self, url: &str) -> Result<Bytes, HazardMapError> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        let response = match self.responses.lock().expect("poisoned").get(url) {
            Some(response) => response.to_result()?,
            None => return Err(HazardMapError::IO),
        };

        if !response.is_success() {
            return Err(HazardMapError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(response.body)
    }

    async fn post_multipart(
        &self,
        _url: &str,
        _request: &UploadRequest,
    ) -> Result<HttpResponse, HazardMapError> {
        self.post_count.fetch_add(1, Ordering::Relaxed);
        match &*self.post_response.lock().expect("poisoned") {
            Some(response) => response.to_result(),
            None => Err(HazardMapError::IO),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    ShowLocationPanel,
    Coordinates(String),
    HazardDetails(Vec<String>, Option<String>),
    Popup(String),
    HidePopup,
    LayerToggle(HazardKind, bool),
    UploadState(UploadState),
    Alert(String),
    ScheduleReload(Duration),
    Datasets(usize),
}

/// View binding that records every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub calls: Vec<ViewCall>,
}

impl RecordingView {
    pub fn last_coordinates(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Coordinates(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_details(&self) -> Option<(&[String], &Option<String>)> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::HazardDetails(details, note) => Some((&details[..], note)),
            _ => None,
        })
    }

    pub fn last_popup(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Popup(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            ViewCall::Alert(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl ViewBinding for RecordingView {
    fn show_location_panel(&mut self) {
        self.calls.push(ViewCall::ShowLocationPanel);
    }

    fn set_coordinates(&mut self, text: &str) {
        self.calls.push(ViewCall::Coordinates(text.to_string()));
    }

    fn set_hazard_details(&mut self, details: &[HazardDetail], note: Option<&str>) {
        self.calls.push(ViewCall::HazardDetails(
            details.iter().map(HazardDetail::text).collect(),
            note.map(str::to_string),
        ));
    }

    fn show_popup(&mut self, popup: &Popup) {
        self.calls.push(ViewCall::Popup(popup.to_string()));
    }

    fn hide_popup(&mut self) {
        self.calls.push(ViewCall::HidePopup);
    }

    fn set_layer_toggle(&mut self, kind: HazardKind, checked: bool) {
        self.calls.push(ViewCall::LayerToggle(kind, checked));
    }

    fn set_upload_state(&mut self, state: &UploadState) {
        self.calls.push(ViewCall::UploadState(state.clone()));
    }

    fn alert(&mut self, message: &str) {
        self.calls.push(ViewCall::Alert(message.to_string()));
    }

    fn schedule_reload(&mut self, delay: Duration) {
        self.calls.push(ViewCall::ScheduleReload(delay));
    }

    fn set_datasets(&mut self, datasets: &[DatasetInfo]) {
        self.calls.push(ViewCall::Datasets(datasets.len()));
    }
}

/// Canvas that records drawing calls.
pub struct RecordingCanvas {
    size: Size,
    pub clears: usize,
    pub polygons: Vec<(Vec<Vec<Point2d>>, Color)>,
    pub lines: Vec<(Vec<Point2d>, Color)>,
    pub points: Vec<Point2d>,
}

impl RecordingCanvas {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            clears: 0,
            polygons: vec![],
            lines: vec![],
            points: vec![],
        }
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.polygons.clear();
        self.lines.clear();
        self.points.clear();
    }

    fn draw_polygon(&mut self, rings: &[Vec<Point2d>], paint: &PolygonPaint) {
        self.polygons.push((rings.to_vec(), paint.color));
    }

    fn draw_line(&mut self, ring: &[Point2d], paint: &LinePaint) {
        self.lines.push((ring.to_vec(), paint.color));
    }

    fn draw_point(&mut self, position: Point2d, _paint: &PointPaint) {
        self.points.push(position);
    }
}

/// Messenger counting redraw requests.
#[derive(Debug, Clone, Default)]
pub struct CountingMessenger(Arc<AtomicUsize>);

impl CountingMessenger {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}

impl Messenger for CountingMessenger {
    fn request_redraw(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}
