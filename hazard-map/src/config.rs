//! Configuration of the hazard map application.

use std::time::Duration;

use hazard_map_types::GeoPoint2d;
use serde::Deserialize;

use crate::error::HazardMapError;
use crate::hazard::HazardKind;

const DEFAULT_RELOAD_DELAY_MS: u64 = 2000;
// Roughly zoom level 10 of the web tile scheme.
const DEFAULT_RESOLUTION: f64 = 152.874_056_570_353_5;

/// Paths of the backend endpoints, relative to [`HazardMapConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    /// Flood feature collection.
    pub flood: String,
    /// Landslide feature collection.
    pub landslide: String,
    /// Liquefaction feature collection.
    pub liquefaction: String,
    /// Shapefile upload.
    pub upload: String,
    /// List of uploaded datasets.
    pub datasets: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            flood: "/api/flood-data/".into(),
            landslide: "/api/landslide-data/".into(),
            liquefaction: "/api/liquefaction-data/".into(),
            upload: "/api/upload-shapefile/".into(),
            datasets: "/api/datasets/".into(),
        }
    }
}

/// Configuration of the hazard map.
///
/// All fields have defaults, so a configuration can be read from a partial JSON document:
///
/// ```
/// use hazard_map::HazardMapConfig;
///
/// let config = HazardMapConfig::from_json(r#"{"base_url": "http://localhost:8000"}"#).unwrap();
/// assert_eq!(config.upload_url(), "http://localhost:8000/api/upload-shapefile/");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HazardMapConfig {
    /// Base URL of the backend. Empty string means the API is served from the same origin as the page.
    pub base_url: String,
    /// Endpoint paths.
    pub endpoints: Endpoints,
    /// Delay before the page is reloaded after a successful upload, in milliseconds.
    pub reload_delay_ms: u64,
    /// Initial center of the map.
    pub center: GeoPoint2d,
    /// Initial resolution of the map in meters per pixel.
    pub resolution: f64,
}

impl Default for HazardMapConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoints: Endpoints::default(),
            reload_delay_ms: DEFAULT_RELOAD_DELAY_MS,
            center: GeoPoint2d::latlon(9.3, 123.3),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl HazardMapConfig {
    /// Reads configuration from a JSON string. Missing fields get their default values.
    pub fn from_json(json: &str) -> Result<Self, HazardMapError> {
        let config: Self = serde_json::from_str(json)?;
        if !config.center.is_valid() {
            return Err(HazardMapError::Validation(format!(
                "invalid map center: {:?}",
                config.center
            )));
        }

        Ok(config)
    }

    /// Sets the base URL of the backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the delay before the page is reloaded after a successful upload.
    pub fn with_reload_delay(mut self, delay: Duration) -> Self {
        self.reload_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Sets the initial center of the map.
    pub fn with_center(mut self, center: GeoPoint2d) -> Self {
        self.center = center;
        self
    }

    /// Sets the initial resolution of the map.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Delay before the page is reloaded after a successful upload.
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }

    /// URL of the feature collection of the given hazard kind.
    pub fn hazard_url(&self, kind: HazardKind) -> String {
        let path = match kind {
            HazardKind::Flood => &self.endpoints.flood,
            HazardKind::Landslide => &self.endpoints.landslide,
            HazardKind::Liquefaction => &self.endpoints.liquefaction,
        };

        self.url(path)
    }

    /// URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        self.url(&self.endpoints.upload)
    }

    /// URL of the dataset list endpoint.
    pub fn datasets_url(&self) -> String {
        self.url(&self.endpoints.datasets)
    }

    fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
