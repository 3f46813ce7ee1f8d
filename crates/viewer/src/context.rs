use foundation::UiScale;
use formats::ViewerOptions;
use layers::{
    Basemap, BasemapManager, ButtonPresentation, Callout, GuideToggle, ImageryLayerCollection,
    RouteGroup, RouteOverlay, apply_callout_style,
};
use scene::World;
use scene::entity::EntityId;
use serde::Serialize;
use tracing::{debug, info};

/// Entities loaded from one document, kept apart from the viewer's own.
#[derive(Debug, Default)]
pub struct DataSource {
    pub name: String,
    pub entities: World,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entities: World::new(),
        }
    }
}

/// Camera flight target, a rectangle in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FlyTo {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl FlyTo {
    pub fn from_bounds([west, south, east, north]: [f64; 4]) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// Everything the viewer put on the globe, plus the state of its controls.
///
/// Built once by [`crate::build_scene`] and then mutated only through the
/// control handlers and [`ViewerContext::restyle`].
#[derive(Debug)]
pub struct ViewerContext {
    pub options: ViewerOptions,
    /// Callout entities owned by the viewer itself.
    pub entities: World,
    pub route: DataSource,
    pub overlay: RouteOverlay,
    pub imagery: ImageryLayerCollection,
    pub basemaps: BasemapManager,
    /// Toggles that have a button, in button order.
    pub guides: Vec<GuideToggle>,
    pub callouts: Vec<Callout>,
    pub fly_to: Option<FlyTo>,
    pub(crate) scale: UiScale,
}

impl ViewerContext {
    /// Scale the current styling was derived from.
    pub fn scale(&self) -> UiScale {
        self.scale
    }

    /// Switch the visible basemap and return the selector states to render.
    pub fn show_basemap(&mut self, basemap: Basemap) -> [(&'static str, bool); 3] {
        self.basemaps.show(&mut self.imagery, basemap);
        info!(selector = basemap.selector_id(), "basemap selected");
        self.basemaps.selector_states()
    }

    pub fn guide(&self, group: RouteGroup) -> Option<&GuideToggle> {
        self.guides.iter().find(|g| g.group() == group)
    }

    /// Flip the toggle for `group`. `None` when that group has no button.
    pub fn toggle_guide(&mut self, group: RouteGroup) -> Option<ButtonPresentation> {
        let toggle = self.guides.iter_mut().find(|g| g.group() == group)?;
        let presentation = toggle.toggle(&self.overlay, &mut self.route.entities);
        info!(
            button = presentation.id,
            visible = presentation.active,
            members = self.overlay.group(group).len(),
            "guide toggled"
        );
        Some(presentation)
    }

    pub fn guide_buttons(&self) -> Vec<ButtonPresentation> {
        self.guides.iter().map(GuideToggle::presentation).collect()
    }

    /// Re-derive every scale-dependent size from `scale`.
    ///
    /// Points and labels in the viewer's entities and in the route data
    /// source are resized, then the route line widths. Visibility, materials
    /// and colors are untouched.
    pub fn restyle(&mut self, scale: UiScale) {
        self.scale = scale;
        for world in [&mut self.entities, &mut self.route.entities] {
            let ids: Vec<EntityId> = world.entities().collect();
            for id in ids {
                apply_callout_style(world, id, scale);
            }
        }
        self.overlay.apply_widths(&mut self.route.entities, scale);
        debug!(scale = scale.value(), "restyled scene");
    }
}
