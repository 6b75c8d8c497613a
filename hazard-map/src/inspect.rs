//! Point inspection: the selection marker and the hazard details of a clicked location.

use hazard_map_types::GeoPoint2d;

use crate::hazard::{HazardKind, SusceptibilityLevel};
use crate::map::LayerCollection;

/// Note shown below the details when some layer could not be queried.
pub const CLICK_REGIONS_NOTE: &str =
    "Click on the colored regions of the map to see detailed hazard information.";

/// Marker of the selected location. A map has at most one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionMarker {
    position: GeoPoint2d,
}

impl SelectionMarker {
    /// Creates a marker at the given position.
    pub fn new(position: GeoPoint2d) -> Self {
        Self { position }
    }

    /// Position of the marker.
    pub fn position(&self) -> GeoPoint2d {
        self.position
    }
}

/// Result of a hazard lookup for one hazard kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HazardFinding {
    /// The point lies inside a hazard polygon.
    Found {
        /// Standardized level of the polygon, if known.
        level: Option<SusceptibilityLevel>,
        /// Classification code of the source dataset.
        original_code: String,
    },
    /// The layer is loaded, but no polygon contains the point.
    NotFound,
    /// The layer data is not available, so the point cannot be checked.
    Unavailable,
}

/// Hazard information of the selected location for one hazard kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardDetail {
    /// Hazard kind.
    pub kind: HazardKind,
    /// Lookup result.
    pub finding: HazardFinding,
}

impl HazardDetail {
    /// Text of the detail line.
    pub fn text(&self) -> String {
        let label = self.kind.label();
        let name = self.kind.as_str();
        match &self.finding {
            HazardFinding::Found {
                level: Some(level),
                original_code,
            } => format!("{label}: {level}, original code {original_code}"),
            HazardFinding::Found {
                level: None,
                original_code,
            } => format!("{label}: Unknown, original code {original_code}"),
            HazardFinding::NotFound => format!("{label}: No {name} susceptibility data here"),
            HazardFinding::Unavailable => format!("{label}: Analyzing {name} susceptibility..."),
        }
    }

    /// Whether the lookup could not be done.
    pub fn is_unavailable(&self) -> bool {
        self.finding == HazardFinding::Unavailable
    }
}

/// Coordinates as shown in the location panel.
pub fn format_coordinates(point: &GeoPoint2d) -> String {
    format!("Lat: {:.6}, Lng: {:.6}", point.lat(), point.lon())
}

/// Looks up the hazard level of the point in every layer, regardless of the layer visibility.
///
/// If several polygons of a layer contain the point, the one drawn on top wins.
pub fn lookup(layers: &LayerCollection, point: &GeoPoint2d) -> Vec<HazardDetail> {
    HazardKind::ALL
        .into_iter()
        .map(|kind| {
            let layer = layers.get(kind);
            let finding = if !layer.is_loaded() {
                HazardFinding::Unavailable
            } else {
                match layer.features_at(point).last() {
                    Some(rendered) => HazardFinding::Found {
                        level: rendered.feature().susceptibility().cloned(),
                        original_code: rendered.feature().original_code().to_string(),
                    },
                    None => HazardFinding::NotFound,
                }
            };

            HazardDetail { kind, finding }
        })
        .collect()
}

/// Note to show below the details, if any.
pub fn details_note(details: &[HazardDetail]) -> Option<&'static str> {
    details
        .iter()
        .any(HazardDetail::is_unavailable)
        .then_some(CLICK_REGIONS_NOTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{HazardFeatureCollection, HazardSymbol};
    use crate::tests::feature_collection_json;

    fn layers() -> LayerCollection {
        let mut layers = LayerCollection::default();
        let json = feature_collection_json(&[
            (123.0, 9.0, Some("MS"), "MF", None),
            (123.0, 9.0, Some("VHS"), "VHF", None),
        ]);
        let data = HazardFeatureCollection::from_geojson(HazardKind::Flood, json.as_bytes())
            .expect("invalid collection");
        layers
            .get_mut(HazardKind::Flood)
            .render_collection(data, &HazardSymbol);
        layers.get_mut(HazardKind::Landslide).render_collection(
            HazardFeatureCollection::new(HazardKind::Landslide, vec![]),
            &HazardSymbol,
        );
        layers.get_mut(HazardKind::Liquefaction).mark_failed();

        layers
    }

    #[test]
    fn coordinates_have_six_decimals() {
        assert_eq!(
            format_coordinates(&GeoPoint2d::latlon(9.3, 123.25)),
            "Lat: 9.300000, Lng: 123.250000"
        );
        assert_eq!(
            format_coordinates(&GeoPoint2d::latlon(-0.1234567, -70.0)),
            "Lat: -0.123457, Lng: -70.000000"
        );
    }

    #[test]
    fn lookup_reports_each_kind() {
        let details = lookup(&layers(), &GeoPoint2d::latlon(9.5, 123.5));

        assert_eq!(details.len(), 3);
        assert_eq!(
            details[0],
            HazardDetail {
                kind: HazardKind::Flood,
                finding: HazardFinding::Found {
                    level: Some(SusceptibilityLevel::VeryHigh),
                    original_code: "VHF".into(),
                },
            }
        );
        assert_eq!(details[1].finding, HazardFinding::NotFound);
        assert_eq!(details[2].finding, HazardFinding::Unavailable);
    }

    #[test]
    fn lookup_ignores_visibility() {
        let mut layers = layers();
        layers.hide(HazardKind::Flood);

        let details = lookup(&layers, &GeoPoint2d::latlon(9.5, 123.5));
        assert!(matches!(details[0].finding, HazardFinding::Found { .. }));
    }

    #[test]
    fn detail_text() {
        let details = lookup(&layers(), &GeoPoint2d::latlon(9.5, 123.5));
        let text: Vec<_> = details.iter().map(HazardDetail::text).collect();

        assert_eq!(
            text,
            vec![
                "Flood: Very High (VHS), original code VHF",
                "Landslide: No landslide susceptibility data here",
                "Liquefaction: Analyzing liquefaction susceptibility...",
            ]
        );
        assert_eq!(details_note(&details), Some(CLICK_REGIONS_NOTE));
    }

    #[test]
    fn no_note_when_all_layers_answered() {
        let mut layers = layers();
        layers.get_mut(HazardKind::Liquefaction).render_collection(
            HazardFeatureCollection::new(HazardKind::Liquefaction, vec![]),
            &HazardSymbol,
        );

        let details = lookup(&layers, &GeoPoint2d::latlon(50.0, 50.0));
        assert!(details
            .iter()
            .all(|d| d.finding == HazardFinding::NotFound));
        assert_eq!(details_note(&details), None);
    }
}
