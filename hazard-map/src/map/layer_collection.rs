use crate::hazard::HazardKind;
use crate::layer::HazardLayer;

/// The three hazard layers of the map with their visibility flags.
///
/// Layers are drawn in the order of [`HazardKind::ALL`]: flood first, then landslide and liquefaction on top. A
/// hidden layer keeps its features and its place in the collection, it is only ignored by the renderer and the
/// popup lookup.
#[derive(Debug, Clone)]
pub struct LayerCollection([LayerEntry; 3]);

#[derive(Debug, Clone)]
struct LayerEntry {
    layer: HazardLayer,
    is_hidden: bool,
}

impl Default for LayerCollection {
    fn default() -> Self {
        Self(HazardKind::ALL.map(|kind| LayerEntry {
            layer: HazardLayer::new(kind),
            is_hidden: false,
        }))
    }
}

impl LayerCollection {
    /// Layer of the given kind.
    pub fn get(&self, kind: HazardKind) -> &HazardLayer {
        &self.0[kind.index()].layer
    }

    /// Mutable layer of the given kind.
    pub fn get_mut(&mut self, kind: HazardKind) -> &mut HazardLayer {
        &mut self.0[kind.index()].layer
    }

    /// Makes the layer visible.
    pub fn show(&mut self, kind: HazardKind) {
        self.set_visible(kind, true);
    }

    /// Hides the layer. It stays in the collection with all its features.
    pub fn hide(&mut self, kind: HazardKind) {
        self.set_visible(kind, false);
    }

    /// Sets visibility of the layer.
    pub fn set_visible(&mut self, kind: HazardKind, visible: bool) {
        self.0[kind.index()].is_hidden = !visible;
    }

    /// Whether the layer is visible.
    pub fn is_visible(&self, kind: HazardKind) -> bool {
        !self.0[kind.index()].is_hidden
    }

    /// Iterates over visible layers in drawing order.
    pub fn iter_visible(&self) -> impl DoubleEndedIterator<Item = &HazardLayer> + '_ {
        self.0
            .iter()
            .filter(|entry| !entry.is_hidden)
            .map(|entry| &entry.layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{HazardFeatureCollection, HazardSymbol};
    use crate::tests::feature_collection_json;

    #[test]
    fn all_layers_visible_by_default() {
        let collection = LayerCollection::default();
        for kind in HazardKind::ALL {
            assert!(collection.is_visible(kind));
            assert_eq!(collection.get(kind).kind(), kind);
        }
        assert_eq!(collection.iter_visible().count(), 3);
    }

    #[test]
    fn toggles_are_independent() {
        let mut collection = LayerCollection::default();
        collection.hide(HazardKind::Landslide);

        assert!(collection.is_visible(HazardKind::Flood));
        assert!(!collection.is_visible(HazardKind::Landslide));
        assert!(collection.is_visible(HazardKind::Liquefaction));

        let visible: Vec<_> = collection.iter_visible().map(|l| l.kind()).collect();
        assert_eq!(visible, vec![HazardKind::Flood, HazardKind::Liquefaction]);

        collection.show(HazardKind::Landslide);
        assert_eq!(collection.iter_visible().count(), 3);
    }

    #[test]
    fn hiding_keeps_features() {
        let mut collection = LayerCollection::default();
        let json = feature_collection_json(&[(123.0, 9.0, Some("HS"), "HF", None)]);
        let data = HazardFeatureCollection::from_geojson(HazardKind::Flood, json.as_bytes())
            .expect("invalid collection");
        collection
            .get_mut(HazardKind::Flood)
            .render_collection(data, &HazardSymbol);

        collection.hide(HazardKind::Flood);
        collection.hide(HazardKind::Flood);
        assert_eq!(collection.get(HazardKind::Flood).len(), 1);

        collection.show(HazardKind::Flood);
        assert_eq!(collection.get(HazardKind::Flood).len(), 1);
    }
}
