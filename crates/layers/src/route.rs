//! Route overlay: classification and styling of the loaded route polylines.

use foundation::{Color, UiScale};
use scene::World;
use scene::components::{HeightReference, PolylineGraphics, PolylineMaterial, Visibility};
use scene::entity::EntityId;

/// Base width of arrow (group B) lines, in pixels.
pub const ARROW_WIDTH_PX: f64 = 25.0;
/// Base width of route (group A) lines, in pixels.
pub const ROUTE_WIDTH_PX: f64 = 4.0;
pub const ROUTE_DASH_LENGTH: f64 = 17.0;
pub const ARROW_ALPHA: f32 = 0.5;

/// Which toggle group a route polyline belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    /// General route path, red dashed and clamped to the ground.
    A,
    /// Directional arrows, floating at their own height.
    B,
    /// Drawn like the route but never part of a toggle group.
    Unclassified,
}

impl RouteGroup {
    /// `style == "arrow"` or `name == "B"` is B; `name == "A"` is A.
    pub fn classify(name: Option<&str>, style: Option<&str>) -> RouteGroup {
        if style == Some("arrow") || name == Some("B") {
            RouteGroup::B
        } else if name == Some("A") {
            RouteGroup::A
        } else {
            RouteGroup::Unclassified
        }
    }

    pub fn base_width_px(self) -> f64 {
        match self {
            RouteGroup::B => ARROW_WIDTH_PX,
            RouteGroup::A | RouteGroup::Unclassified => ROUTE_WIDTH_PX,
        }
    }

    /// Apply this group's look to `polyline`.
    pub fn style(self, polyline: &mut PolylineGraphics, scale: UiScale) {
        polyline.width = scale.px(self.base_width_px());
        match self {
            RouteGroup::B => {
                polyline.material = PolylineMaterial::Arrow(Color::YELLOW.with_alpha(ARROW_ALPHA));
                polyline.clamp_to_ground = false;
                polyline.height_reference = HeightReference::None;
            }
            RouteGroup::A | RouteGroup::Unclassified => {
                polyline.material = PolylineMaterial::Dash {
                    color: Color::RED,
                    gap_color: Color::TRANSPARENT,
                    dash_length: ROUTE_DASH_LENGTH,
                };
                polyline.clamp_to_ground = true;
            }
        }
    }
}

/// Styled route polylines, grouped for toggling and restyling.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RouteOverlay {
    group_a: Vec<EntityId>,
    group_b: Vec<EntityId>,
    unclassified: Vec<EntityId>,
}

impl RouteOverlay {
    /// Classify and style every polyline entity in `world`. Entities without
    /// a polyline (null-geometry placeholders, markers) are skipped.
    pub fn style(world: &mut World, scale: UiScale) -> Self {
        let mut overlay = RouteOverlay::default();
        let entities: Vec<EntityId> = world.entities().collect();
        for entity in entities {
            if world.polyline(entity).is_none() {
                continue;
            }
            let group = classify_entity(world, entity);
            if let Some(polyline) = world.polyline_mut(entity) {
                group.style(polyline, scale);
            }
            overlay.members_mut(group).push(entity);
        }
        overlay
    }

    pub fn group(&self, group: RouteGroup) -> &[EntityId] {
        match group {
            RouteGroup::A => &self.group_a,
            RouteGroup::B => &self.group_b,
            RouteGroup::Unclassified => &self.unclassified,
        }
    }

    /// Show or hide every member of a toggle group.
    pub fn set_group_visible(&self, world: &mut World, group: RouteGroup, visible: bool) {
        for entity in self.group(group) {
            world.set_visibility(*entity, Visibility::from(visible));
        }
    }

    /// Re-derive the widths of the toggle groups (B and A) from `scale`.
    /// Unclassified lines keep their load-time width. Materials and
    /// visibility are kept.
    pub fn apply_widths(&self, world: &mut World, scale: UiScale) {
        for group in [RouteGroup::B, RouteGroup::A] {
            let width = scale.px(group.base_width_px());
            for entity in self.group(group) {
                if let Some(polyline) = world.polyline_mut(*entity) {
                    polyline.width = width;
                }
            }
        }
    }

    fn members_mut(&mut self, group: RouteGroup) -> &mut Vec<EntityId> {
        match group {
            RouteGroup::A => &mut self.group_a,
            RouteGroup::B => &mut self.group_b,
            RouteGroup::Unclassified => &mut self.unclassified,
        }
    }
}

fn classify_entity(world: &World, entity: EntityId) -> RouteGroup {
    let props = world.properties(entity);
    let name = world
        .name(entity)
        .or_else(|| props.and_then(|p| p.get("name")));
    let style = props.and_then(|p| p.get("style"));
    RouteGroup::classify(name, style)
}

#[cfg(test)]
mod tests {
    use super::{RouteGroup, RouteOverlay};
    use foundation::{Color, UiScale};
    use formats::{VectorChunk, ingest_route};
    use scene::World;
    use scene::components::{
        ComponentProperties, HeightReference, PolylineGraphics, PolylineMaterial,
    };
    use scene::entity::EntityId;

    fn line(world: &mut World, props: &[(&str, &str)]) -> EntityId {
        let entity = world.spawn();
        world.set_properties(
            entity,
            ComponentProperties::new(
                props
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
        );
        world.set_polyline(entity, PolylineGraphics::new(Vec::new()));
        entity
    }

    #[test]
    fn classification_rules() {
        assert_eq!(RouteGroup::classify(Some("B"), None), RouteGroup::B);
        assert_eq!(RouteGroup::classify(Some("A"), Some("arrow")), RouteGroup::B);
        assert_eq!(RouteGroup::classify(None, Some("arrow")), RouteGroup::B);
        assert_eq!(RouteGroup::classify(Some("A"), Some("Line")), RouteGroup::A);
        assert_eq!(RouteGroup::classify(Some("C"), None), RouteGroup::Unclassified);
        assert_eq!(RouteGroup::classify(None, None), RouteGroup::Unclassified);
    }

    #[test]
    fn bundled_route_fills_group_b_only() {
        let payload = include_str!("../../apps/viewer_web/assets/route.geojson");
        let chunk = VectorChunk::from_geojson_str(payload).expect("parse route");
        let mut world = World::new();
        let entities = ingest_route(&mut world, &chunk);

        let overlay = RouteOverlay::style(&mut world, UiScale::ONE);
        assert_eq!(overlay.group(RouteGroup::B).len(), 12);
        assert!(overlay.group(RouteGroup::A).is_empty());
        assert!(overlay.group(RouteGroup::Unclassified).is_empty());
        // The null-geometry "A" placeholder is in no group.
        assert!(!overlay.group(RouteGroup::B).contains(&entities[0]));

        let arrow = world.polyline(entities[1]).expect("arrow polyline");
        assert_eq!(arrow.width, 25);
        assert_eq!(
            arrow.material,
            PolylineMaterial::Arrow(Color::YELLOW.with_alpha(0.5))
        );
        assert!(!arrow.clamp_to_ground);
        assert_eq!(arrow.height_reference, HeightReference::None);
    }

    #[test]
    fn route_lines_are_dashed_and_clamped() {
        let mut world = World::new();
        let a = line(&mut world, &[("name", "A")]);
        let other = line(&mut world, &[("name", "ferry")]);
        let overlay = RouteOverlay::style(&mut world, UiScale::new(1.4));

        assert_eq!(overlay.group(RouteGroup::A), &[a]);
        assert_eq!(overlay.group(RouteGroup::Unclassified), &[other]);
        for entity in [a, other] {
            let polyline = world.polyline(entity).expect("polyline");
            assert_eq!(polyline.width, 6);
            assert!(polyline.clamp_to_ground);
            assert_eq!(
                polyline.material,
                PolylineMaterial::Dash {
                    color: Color::RED,
                    gap_color: Color::TRANSPARENT,
                    dash_length: 17.0,
                }
            );
        }
    }

    #[test]
    fn entity_name_wins_over_property() {
        let mut world = World::new();
        let e = line(&mut world, &[("name", "A")]);
        world.set_name(e, "B");
        let overlay = RouteOverlay::style(&mut world, UiScale::ONE);
        assert_eq!(overlay.group(RouteGroup::B), &[e]);
    }

    #[test]
    fn toggling_and_rescaling_touch_only_their_targets() {
        let mut world = World::new();
        let a = line(&mut world, &[("name", "A")]);
        let b = line(&mut world, &[("style", "arrow")]);
        let other = line(&mut world, &[("name", "ferry")]);
        let overlay = RouteOverlay::style(&mut world, UiScale::ONE);

        overlay.set_group_visible(&mut world, RouteGroup::B, false);
        assert!(!world.is_shown(b));
        assert!(world.is_shown(a));

        overlay.apply_widths(&mut world, UiScale::new(1.25));
        assert_eq!(world.polyline(b).map(|p| p.width), Some(31));
        assert_eq!(world.polyline(a).map(|p| p.width), Some(5));
        assert_eq!(world.polyline(other).map(|p| p.width), Some(4));
        assert!(!world.is_shown(b));
    }
}
