use crate::components::{
    ComponentProperties, LabelGraphics, PointGraphics, PolylineGraphics, Transform, Visibility,
};
use crate::entity::EntityId;
use foundation::handles::Handle;

/// Entity collection. Components are stored column-wise, indexed by entity.
#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    names: Vec<Option<String>>,
    transforms: Vec<Option<Transform>>,
    visibility: Vec<Option<Visibility>>,
    properties: Vec<Option<ComponentProperties>>,
    points: Vec<Option<PointGraphics>>,
    labels: Vec<Option<LabelGraphics>>,
    polylines: Vec<Option<PolylineGraphics>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        id
    }

    pub fn len(&self) -> usize {
        self.next_index as usize
    }

    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// All entities, in spawn order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.next_index).map(|idx| EntityId(Handle::new(idx, 0)))
    }

    pub fn set_name(&mut self, entity: EntityId, name: impl Into<String>) {
        self.ensure_capacity(entity.index() as usize);
        self.names[entity.index() as usize] = Some(name.into());
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.names
            .get(entity.index() as usize)
            .and_then(|n| n.as_deref())
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms
            .get(entity.index() as usize)
            .and_then(|t| *t)
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn is_shown(&self, entity: EntityId) -> bool {
        self.visibility
            .get(entity.index() as usize)
            .and_then(|v| *v)
            .unwrap_or_default()
            .show
    }

    pub fn set_properties(&mut self, entity: EntityId, properties: ComponentProperties) {
        self.ensure_capacity(entity.index() as usize);
        self.properties[entity.index() as usize] = Some(properties);
    }

    pub fn properties(&self, entity: EntityId) -> Option<&ComponentProperties> {
        self.properties
            .get(entity.index() as usize)
            .and_then(|p| p.as_ref())
    }

    pub fn set_point(&mut self, entity: EntityId, point: PointGraphics) {
        self.ensure_capacity(entity.index() as usize);
        self.points[entity.index() as usize] = Some(point);
    }

    pub fn point(&self, entity: EntityId) -> Option<&PointGraphics> {
        self.points
            .get(entity.index() as usize)
            .and_then(|p| p.as_ref())
    }

    pub fn point_mut(&mut self, entity: EntityId) -> Option<&mut PointGraphics> {
        self.points
            .get_mut(entity.index() as usize)
            .and_then(|p| p.as_mut())
    }

    pub fn set_label(&mut self, entity: EntityId, label: LabelGraphics) {
        self.ensure_capacity(entity.index() as usize);
        self.labels[entity.index() as usize] = Some(label);
    }

    pub fn label(&self, entity: EntityId) -> Option<&LabelGraphics> {
        self.labels
            .get(entity.index() as usize)
            .and_then(|l| l.as_ref())
    }

    pub fn label_mut(&mut self, entity: EntityId) -> Option<&mut LabelGraphics> {
        self.labels
            .get_mut(entity.index() as usize)
            .and_then(|l| l.as_mut())
    }

    pub fn set_polyline(&mut self, entity: EntityId, polyline: PolylineGraphics) {
        self.ensure_capacity(entity.index() as usize);
        self.polylines[entity.index() as usize] = Some(polyline);
    }

    pub fn polyline(&self, entity: EntityId) -> Option<&PolylineGraphics> {
        self.polylines
            .get(entity.index() as usize)
            .and_then(|p| p.as_ref())
    }

    pub fn polyline_mut(&mut self, entity: EntityId) -> Option<&mut PolylineGraphics> {
        self.polylines
            .get_mut(entity.index() as usize)
            .and_then(|p| p.as_mut())
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.names.resize(new_len, None);
            self.transforms.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.properties.resize(new_len, None);
            self.points.resize(new_len, None);
            self.labels.resize(new_len, None);
            self.polylines.resize(new_len, None);
        }
    }
}
