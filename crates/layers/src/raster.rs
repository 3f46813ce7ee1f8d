use formats::ImagerySource;

use crate::layer::{Layer, LayerId};

/// A full-globe imagery layer backed by a tile source.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageryLayer {
    id: LayerId,
    pub source: ImagerySource,
    pub show: bool,
    pub alpha: f32,
    pub brightness: f32,
}

impl ImageryLayer {
    pub fn new(id: u64, source: ImagerySource) -> Self {
        Self {
            id: LayerId(id),
            source,
            show: true,
            alpha: 1.0,
            brightness: 1.0,
        }
    }

    pub fn credit(&self) -> Option<&str> {
        match &self.source {
            ImagerySource::UrlTemplate { credit, .. } => credit.as_deref(),
            ImagerySource::Ion { .. } => None,
        }
    }
}

impl Layer for ImageryLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}

/// Ordered stack of imagery layers; index 0 is drawn first (bottom).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImageryLayerCollection {
    next_id: u64,
    layers: Vec<ImageryLayer>,
}

impl ImageryLayerCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer on top of the stack.
    pub fn add(&mut self, source: ImagerySource) -> LayerId {
        let layer = ImageryLayer::new(self.next_id, source);
        self.next_id += 1;
        let id = layer.id();
        self.layers.push(layer);
        id
    }

    pub fn remove(&mut self, id: LayerId) -> Option<ImageryLayer> {
        let idx = self.index_of(id)?;
        Some(self.layers.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn get(&self, id: LayerId) -> Option<&ImageryLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut ImageryLayer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &ImageryLayer> {
        self.layers.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ImageryLayer> {
        self.layers.iter_mut()
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    pub fn set_show(&mut self, id: LayerId, show: bool) {
        if let Some(layer) = self.get_mut(id) {
            layer.show = show;
        }
    }

    pub fn raise_to_top(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id) {
            let layer = self.layers.remove(idx);
            self.layers.push(layer);
        }
    }

    pub fn lower_to_bottom(&mut self, id: LayerId) {
        if let Some(idx) = self.index_of(id) {
            let layer = self.layers.remove(idx);
            self.layers.insert(0, layer);
        }
    }
}
