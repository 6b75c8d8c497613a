//! Fetching of hazard datasets from the backend.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};

use crate::config::HazardMapConfig;
use crate::error::HazardMapError;
use crate::hazard::HazardKind;
use crate::layer::HazardFeatureCollection;
use crate::platform::PlatformService;

/// A dataset uploaded to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Dataset id, referenced by the `dataset_id` property of features.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Hazard kind of the dataset.
    pub dataset_type: HazardKind,
    /// Upload timestamp as reported by the server.
    pub upload_date: String,
    /// Name of the uploaded file.
    pub file_name: String,
}

/// Result of [`HazardDataLoader::load_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Kinds that were loaded, in the order of completion.
    pub loaded: Vec<HazardKind>,
    /// Kinds that failed to load, in the order of completion.
    pub failed: Vec<HazardKind>,
}

impl LoadSummary {
    /// Whether every dataset failed to load.
    pub fn is_total_failure(&self) -> bool {
        self.loaded.is_empty() && !self.failed.is_empty()
    }
}

/// Loads hazard datasets through a [`PlatformService`].
pub struct HazardDataLoader<P: PlatformService> {
    platform: P,
    config: HazardMapConfig,
}

impl<P: PlatformService> HazardDataLoader<P> {
    /// Creates a new loader for the endpoints in the config.
    pub fn new(platform: P, config: &HazardMapConfig) -> Self {
        Self {
            platform,
            config: config.clone(),
        }
    }

    /// Platform service used by the loader.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Loads and parses the dataset of one hazard kind.
    pub async fn load(&self, kind: HazardKind) -> Result<HazardFeatureCollection, HazardMapError> {
        let url = self.config.hazard_url(kind);
        log::debug!("Loading {kind} data from {url}");

        let bytes = self.platform.load_bytes_from_url(&url).await?;
        let collection = HazardFeatureCollection::from_geojson(kind, &bytes)?;

        log::info!("Loaded {} {kind} features", collection.len());
        Ok(collection)
    }

    /// Loads all datasets concurrently. Every result is given to `on_loaded` as soon as it arrives, so one slow
    /// dataset does not hold back the others.
    ///
    /// Failures are logged and reported through the callback and the summary, they do not stop other loads.
    pub async fn load_all(
        &self,
        mut on_loaded: impl FnMut(HazardKind, Result<HazardFeatureCollection, HazardMapError>),
    ) -> LoadSummary {
        let mut requests: FuturesUnordered<_> = HazardKind::ALL
            .into_iter()
            .map(|kind| async move { (kind, self.load(kind).await) })
            .collect();

        let mut summary = LoadSummary::default();
        while let Some((kind, result)) = requests.next().await {
            match &result {
                Ok(_) => summary.loaded.push(kind),
                Err(err) => {
                    log::warn!("Failed to load {kind} data: {err}");
                    summary.failed.push(kind);
                }
            }

            on_loaded(kind, result);
        }

        if summary.is_total_failure() {
            log::warn!("No hazard data could be loaded, the map shows no overlays");
        }

        summary
    }

    /// Loads the list of uploaded datasets.
    pub async fn load_datasets(&self) -> Result<Vec<DatasetInfo>, HazardMapError> {
        let url = self.config.datasets_url();
        let bytes = self.platform.load_bytes_from_url(&url).await?;
        let datasets: Vec<DatasetInfo> = serde_json::from_slice(&bytes)?;

        log::debug!("Backend has {} datasets", datasets.len());
        Ok(datasets)
    }
}
