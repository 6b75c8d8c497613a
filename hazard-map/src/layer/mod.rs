//! Hazard layers hold the rendered features of one hazard kind and draw them to a [`Canvas`].

use hazard_map_types::{BoundingRect, GeoPoint2d, ProjectedPolygon, WebMercator};

use crate::hazard::HazardKind;
use crate::render::{Canvas, LinePaint, PolygonPaint};
use crate::view::MapView;

pub mod feature;
pub mod popup;
pub mod symbol;

pub use feature::{HazardFeature, HazardFeatureCollection};
pub use popup::Popup;
pub use symbol::{HazardSymbol, PolygonStyle, Symbol};

/// A feature prepared for drawing: its style, popup and geometry projected into map coordinates.
#[derive(Debug, Clone)]
pub struct RenderedFeature {
    feature: HazardFeature,
    style: PolygonStyle,
    popup: Popup,
    projected: Vec<ProjectedPolygon>,
    bbox: Option<BoundingRect>,
}

impl RenderedFeature {
    fn new(kind: HazardKind, feature: HazardFeature, symbol: &impl Symbol<HazardFeature>) -> Self {
        let projection = WebMercator::default();
        let projected = match feature.geometry().project(&projection) {
            Some(projected) => projected,
            None => {
                log::debug!("Feature of {kind} layer cannot be projected and will not be drawn");
                vec![]
            }
        };
        let bbox = projected
            .iter()
            .filter_map(|polygon| BoundingRect::from_points(polygon.exterior.iter()))
            .reduce(|a, b| a.merge(b));

        Self {
            style: symbol.style(&feature),
            popup: Popup::for_feature(kind, &feature),
            feature,
            projected,
            bbox,
        }
    }

    /// The source feature.
    pub fn feature(&self) -> &HazardFeature {
        &self.feature
    }

    /// Style the feature is drawn with.
    pub fn style(&self) -> &PolygonStyle {
        &self.style
    }

    /// Popup shown when the feature is clicked.
    pub fn popup(&self) -> &Popup {
        &self.popup
    }

    fn render(&self, view: &MapView, canvas: &mut dyn Canvas) {
        let fill = PolygonPaint {
            color: self.style.fill_color,
        };
        let stroke = LinePaint {
            color: self.style.stroke_color,
            width: self.style.stroke_width,
        };

        for polygon in &self.projected {
            let rings: Vec<Vec<_>> = polygon
                .rings()
                .map(|ring| ring.iter().map(|p| view.map_to_screen(p)).collect())
                .collect();

            canvas.draw_polygon(&rings, &fill);
            for ring in &rings {
                canvas.draw_line(ring, &stroke);
            }
        }
    }
}

/// State of the data of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Data has not been received yet.
    #[default]
    NotLoaded,
    /// Data was received and rendered.
    Loaded,
    /// Data could not be loaded.
    Failed,
}

/// Layer with features of a single hazard kind.
#[derive(Debug, Clone)]
pub struct HazardLayer {
    kind: HazardKind,
    features: Vec<RenderedFeature>,
    state: LoadState,
}

impl HazardLayer {
    /// Creates an empty layer.
    pub fn new(kind: HazardKind) -> Self {
        Self {
            kind,
            features: vec![],
            state: LoadState::NotLoaded,
        }
    }

    /// Hazard kind of the layer.
    pub fn kind(&self) -> HazardKind {
        self.kind
    }

    /// Replaces contents of the layer with the features of the collection, styled with the given symbol.
    ///
    /// Returns the number of rendered features. A collection of another hazard kind is still rendered, but the
    /// popups use the kind of the layer.
    pub fn render_collection(
        &mut self,
        collection: HazardFeatureCollection,
        symbol: &impl Symbol<HazardFeature>,
    ) -> usize {
        if collection.kind() != self.kind {
            log::warn!(
                "{} data is rendered into the {} layer",
                collection.kind(),
                self.kind
            );
        }

        let kind = self.kind;
        self.features = collection
            .into_iter()
            .map(|feature| RenderedFeature::new(kind, feature, symbol))
            .collect();
        self.state = LoadState::Loaded;

        log::debug!("{} layer now has {} features", self.kind, self.features.len());
        self.features.len()
    }

    /// Marks the layer as failed to load. Features rendered earlier are kept.
    pub fn mark_failed(&mut self) {
        if self.state != LoadState::Loaded {
            self.state = LoadState::Failed;
        }
    }

    /// Load state of the layer.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Whether the layer data has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// Rendered features of the layer.
    pub fn features(&self) -> &[RenderedFeature] {
        &self.features
    }

    /// Number of rendered features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features whose geometry contains the point, in drawing order.
    pub fn features_at<'a>(
        &'a self,
        point: &'a GeoPoint2d,
    ) -> impl Iterator<Item = &'a RenderedFeature> + 'a {
        self.features
            .iter()
            .filter(move |rendered| rendered.feature.contains(point))
    }

    /// Draws the features that are inside the view.
    pub fn render(&self, view: &MapView, canvas: &mut dyn Canvas) {
        let view_bbox = view.get_bbox();
        for feature in &self.features {
            match feature.bbox {
                Some(bbox) if bbox.intersects(&view_bbox) => feature.render(view, canvas),
                _ => {}
            }
        }
    }
}
