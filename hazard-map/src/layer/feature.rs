//! Hazard features parsed from GeoJSON feature collections.

use hazard_map_types::{GeoPoint2d, HazardGeometry};
use serde_json::{Map, Value};

use crate::error::HazardMapError;
use crate::hazard::{HazardKind, SusceptibilityLevel};

/// A single hazard polygon with its classification attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardFeature {
    geometry: HazardGeometry,
    susceptibility: Option<SusceptibilityLevel>,
    original_code: String,
    shape_area: Option<f64>,
    dataset_id: Option<i64>,
}

impl HazardFeature {
    /// Creates a new feature.
    pub fn new(
        geometry: HazardGeometry,
        susceptibility: Option<SusceptibilityLevel>,
        original_code: impl Into<String>,
    ) -> Self {
        Self {
            geometry,
            susceptibility,
            original_code: original_code.into(),
            shape_area: None,
            dataset_id: None,
        }
    }

    /// Sets the area attribute of the feature.
    pub fn with_shape_area(mut self, shape_area: f64) -> Self {
        self.shape_area = Some(shape_area);
        self
    }

    /// Geometry of the feature.
    pub fn geometry(&self) -> &HazardGeometry {
        &self.geometry
    }

    /// Standardized susceptibility level. `None` if the backend provided no classification.
    pub fn susceptibility(&self) -> Option<&SusceptibilityLevel> {
        self.susceptibility.as_ref()
    }

    /// Classification code from the source dataset.
    pub fn original_code(&self) -> &str {
        &self.original_code
    }

    /// Area of the polygon as computed by the source dataset.
    pub fn shape_area(&self) -> Option<f64> {
        self.shape_area
    }

    /// Id of the uploaded dataset the feature belongs to.
    pub fn dataset_id(&self) -> Option<i64> {
        self.dataset_id
    }

    /// Returns true if the point is inside the feature polygon.
    pub fn contains(&self, point: &GeoPoint2d) -> bool {
        self.geometry.contains(point)
    }

    fn from_geojson(
        kind: HazardKind,
        feature: geojson::Feature,
    ) -> Result<Self, HazardMapError> {
        let geometry = feature
            .geometry
            .ok_or_else(|| HazardMapError::Decoding("feature has no geometry".into()))?;
        let geometry = HazardGeometry::from_geojson(&geometry.value)?;

        let properties = feature.properties.unwrap_or_default();
        let original_code = string_property(&properties, "original_code").unwrap_or_default();
        let susceptibility = match string_property(&properties, "susceptibility") {
            Some(code) if !code.trim().is_empty() => Some(SusceptibilityLevel::from_code(&code)),
            _ if !original_code.trim().is_empty() => {
                Some(SusceptibilityLevel::standardize(kind, &original_code))
            }
            _ => None,
        };

        Ok(Self {
            geometry,
            susceptibility,
            original_code,
            shape_area: properties.get("shape_area").and_then(Value::as_f64),
            dataset_id: properties.get("dataset_id").and_then(Value::as_i64),
        })
    }
}

fn string_property(properties: &Map<String, Value>, name: &str) -> Option<String> {
    match properties.get(name)? {
        Value::String(value) => Some(value.clone()),
        Value::Number(value) => Some(value.to_string()),
        _ => None,
    }
}

/// Feature collection of a single hazard kind, as received from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardFeatureCollection {
    kind: HazardKind,
    features: Vec<HazardFeature>,
    skipped: usize,
}

impl HazardFeatureCollection {
    /// Creates a collection from already parsed features.
    pub fn new(kind: HazardKind, features: Vec<HazardFeature>) -> Self {
        Self {
            kind,
            features,
            skipped: 0,
        }
    }

    /// Parses a GeoJSON `FeatureCollection` document.
    ///
    /// Features that have no geometry or whose geometry is not polygonal are skipped. The number of skipped features
    /// is available through [`HazardFeatureCollection::skipped`].
    pub fn from_geojson(kind: HazardKind, data: &[u8]) -> Result<Self, HazardMapError> {
        let collection: geojson::FeatureCollection = serde_json::from_slice(data)?;

        let mut features = Vec::with_capacity(collection.features.len());
        let mut skipped = 0;
        for (index, feature) in collection.features.into_iter().enumerate() {
            match HazardFeature::from_geojson(kind, feature) {
                Ok(feature) => features.push(feature),
                Err(err) => {
                    log::warn!("Skipping {kind} feature {index}: {err}");
                    skipped += 1;
                }
            }
        }

        Ok(Self {
            kind,
            features,
            skipped,
        })
    }

    /// Hazard kind of the collection.
    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    /// Parsed features.
    pub fn features(&self) -> &[HazardFeature] {
        &self.features
    }

    /// Number of features in the source document that could not be used.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of parsed features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if there are no parsed features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl IntoIterator for HazardFeatureCollection {
    type Item = HazardFeature;
    type IntoIter = std::vec::IntoIter<HazardFeature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}
