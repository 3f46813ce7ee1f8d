//! Exclusive basemap selection.
//!
//! Three basemap groups share one imagery stack: satellite, the standard map
//! and a set of historical map sheets drawn together. Exactly one group is
//! visible at any time.

use formats::ImageryConfig;

use crate::layer::LayerId;
use crate::raster::ImageryLayerCollection;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Basemap {
    Satellite,
    StandardMap,
    HistoricalMaps,
}

impl Basemap {
    pub const ALL: [Basemap; 3] = [
        Basemap::StandardMap,
        Basemap::Satellite,
        Basemap::HistoricalMaps,
    ];

    /// DOM id of the selector button for this basemap.
    pub fn selector_id(self) -> &'static str {
        match self {
            Basemap::Satellite => "btn-satellite",
            Basemap::StandardMap => "btn-gsi",
            Basemap::HistoricalMaps => "btn-old",
        }
    }

    pub fn from_selector_id(id: &str) -> Option<Basemap> {
        Basemap::ALL.into_iter().find(|b| b.selector_id() == id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasemapManager {
    satellite: LayerId,
    standard_map: LayerId,
    historical_maps: Vec<LayerId>,
    selected: Basemap,
}

impl BasemapManager {
    /// Add every configured source to `layers` (satellite, standard map, then
    /// the historical sheets in order) and select the satellite basemap.
    pub fn install(layers: &mut ImageryLayerCollection, config: &ImageryConfig) -> Self {
        let satellite = layers.add(config.satellite.clone());
        let standard_map = layers.add(config.standard_map.clone());
        let historical_maps: Vec<LayerId> = config
            .historical_maps
            .iter()
            .map(|source| layers.add(source.clone()))
            .collect();

        let manager = Self {
            satellite,
            standard_map,
            historical_maps,
            selected: Basemap::Satellite,
        };
        for id in manager.all_layers() {
            if let Some(layer) = layers.get_mut(id) {
                layer.alpha = config.alpha;
                layer.brightness = config.brightness;
            }
        }

        // Initial selection keeps the insertion order.
        manager.hide_all(layers);
        layers.set_show(manager.satellite, true);
        manager
    }

    pub fn selected(&self) -> Basemap {
        self.selected
    }

    pub fn layers_of(&self, basemap: Basemap) -> Vec<LayerId> {
        match basemap {
            Basemap::Satellite => vec![self.satellite],
            Basemap::StandardMap => vec![self.standard_map],
            Basemap::HistoricalMaps => self.historical_maps.clone(),
        }
    }

    pub fn show_satellite(&mut self, layers: &mut ImageryLayerCollection) {
        self.show(layers, Basemap::Satellite);
    }

    pub fn show_standard_map(&mut self, layers: &mut ImageryLayerCollection) {
        self.show(layers, Basemap::StandardMap);
    }

    pub fn show_historical_maps(&mut self, layers: &mut ImageryLayerCollection) {
        self.show(layers, Basemap::HistoricalMaps);
    }

    /// Hide every basemap layer, show the `basemap` group and restack it.
    ///
    /// Satellite and the standard map are lowered to the bottom of the stack;
    /// for the historical maps only the last sheet is raised to the top.
    pub fn show(&mut self, layers: &mut ImageryLayerCollection, basemap: Basemap) {
        self.hide_all(layers);
        for id in self.layers_of(basemap) {
            layers.set_show(id, true);
        }
        match basemap {
            Basemap::Satellite => layers.lower_to_bottom(self.satellite),
            Basemap::StandardMap => layers.lower_to_bottom(self.standard_map),
            Basemap::HistoricalMaps => {
                if let Some(last) = self.historical_maps.last() {
                    layers.raise_to_top(*last);
                }
            }
        }
        self.selected = basemap;
    }

    /// `(selector id, active)` for every selector button.
    pub fn selector_states(&self) -> [(&'static str, bool); 3] {
        Basemap::ALL.map(|b| (b.selector_id(), b == self.selected))
    }

    fn all_layers(&self) -> Vec<LayerId> {
        let mut ids = vec![self.satellite, self.standard_map];
        ids.extend(self.historical_maps.iter().copied());
        ids
    }

    fn hide_all(&self, layers: &mut ImageryLayerCollection) {
        for id in self.all_layers() {
            layers.set_show(id, false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Basemap, BasemapManager};
    use crate::layer::{Layer, LayerId};
    use crate::raster::ImageryLayerCollection;
    use formats::ImageryConfig;

    fn setup() -> (ImageryLayerCollection, BasemapManager) {
        let mut layers = ImageryLayerCollection::new();
        let manager = BasemapManager::install(&mut layers, &ImageryConfig::default());
        (layers, manager)
    }

    fn visible_groups(layers: &ImageryLayerCollection, manager: &BasemapManager) -> Vec<Basemap> {
        Basemap::ALL
            .into_iter()
            .filter(|b| {
                let ids = manager.layers_of(*b);
                let shown = ids
                    .iter()
                    .filter(|id| layers.get(**id).is_some_and(|l| l.show))
                    .count();
                assert!(shown == 0 || shown == ids.len(), "{b:?} partially visible");
                shown == ids.len()
            })
            .collect()
    }

    fn order(layers: &ImageryLayerCollection) -> Vec<LayerId> {
        layers.iter().map(|l| l.id()).collect()
    }

    #[test]
    fn install_selects_satellite_and_styles_layers() {
        let (layers, manager) = setup();
        assert_eq!(layers.len(), 4);
        assert_eq!(manager.selected(), Basemap::Satellite);
        assert_eq!(visible_groups(&layers, &manager), vec![Basemap::Satellite]);
        assert!(layers.iter().all(|l| l.alpha == 1.0 && l.brightness == 0.95));
    }

    #[test]
    fn exactly_one_group_visible_after_any_switch() {
        let (mut layers, mut manager) = setup();
        let sequence = [
            Basemap::StandardMap,
            Basemap::HistoricalMaps,
            Basemap::Satellite,
            Basemap::HistoricalMaps,
            Basemap::HistoricalMaps,
            Basemap::StandardMap,
        ];
        for basemap in sequence {
            manager.show(&mut layers, basemap);
            assert_eq!(visible_groups(&layers, &manager), vec![basemap]);
            assert_eq!(manager.selected(), basemap);
        }
    }

    #[test]
    fn stacking_order_follows_selection() {
        let (mut layers, mut manager) = setup();
        let sat = manager.layers_of(Basemap::Satellite)[0];
        let std = manager.layers_of(Basemap::StandardMap)[0];
        let old = manager.layers_of(Basemap::HistoricalMaps);

        manager.show_standard_map(&mut layers);
        assert_eq!(order(&layers), vec![std, sat, old[0], old[1]]);

        manager.show_historical_maps(&mut layers);
        assert_eq!(order(&layers), vec![std, sat, old[0], old[1]]);

        manager.show_satellite(&mut layers);
        assert_eq!(order(&layers), vec![sat, std, old[0], old[1]]);

        // Something stacked above the sheets is overtaken by the last sheet.
        let overlay = layers.add(formats::ImagerySource::Ion { asset_id: 7 });
        manager.show_historical_maps(&mut layers);
        assert_eq!(order(&layers), vec![sat, std, old[0], overlay, old[1]]);
    }

    #[test]
    fn selector_states_mark_only_the_selection() {
        let (mut layers, mut manager) = setup();
        manager.show_historical_maps(&mut layers);
        assert_eq!(
            manager.selector_states(),
            [("btn-gsi", false), ("btn-satellite", false), ("btn-old", true)]
        );
        assert_eq!(Basemap::from_selector_id("btn-gsi"), Some(Basemap::StandardMap));
        assert_eq!(Basemap::from_selector_id("btn-guideB"), None);
    }
}
