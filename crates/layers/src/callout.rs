//! Callouts: a ground marker, a vertical leader line and a lifted label.

use foundation::math::{Vec2, ecef_from_degrees};
use foundation::{Color, UiScale};
use formats::CalloutPoint;
use scene::World;
use scene::components::{
    LabelFont, LabelGraphics, LabelStyle, NearFarScalar, PointGraphics, PolylineGraphics,
    PolylineMaterial, Transform, VerticalOrigin,
};
use scene::entity::EntityId;

use crate::terrain::{TerrainError, TerrainSampler};

pub const MARKER_SIZE_PX: f64 = 8.0;
pub const MARKER_OUTLINE_PX: f64 = 2.0;
pub const LEADER_WIDTH_PX: f64 = 2.0;
pub const LABEL_FONT_PX: f64 = 18.0;
pub const LABEL_OUTLINE_PX: f64 = 3.0;
pub const LABEL_OFFSET_PX: f64 = 8.0;
/// Label scale is 1.0 at this camera distance (meters)...
pub const LABEL_NEAR_M: f64 = 300.0;
/// ...shrinking linearly to [`LABEL_FAR_SCALE`] at this one.
pub const LABEL_FAR_M: f64 = 8000.0;
pub const LABEL_FAR_SCALE: f64 = 0.7;
pub const LEADER_ALPHA: f32 = 0.9;

/// Entities created for one callout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Callout {
    pub leader: EntityId,
    pub marker: EntityId,
    pub label: EntityId,
    /// Sampled ground height; 0 when the terrain had no answer.
    pub ground_height_m: f64,
}

/// Sample the ground under `point` and annotate it in `world`.
///
/// A missing (or non-finite) sample puts the ground at height 0. Sampling
/// errors are returned and nothing is added.
pub async fn add_callout<T: TerrainSampler>(
    world: &mut World,
    terrain: &T,
    point: &CalloutPoint,
    scale: UiScale,
) -> Result<Callout, TerrainError> {
    let sampled = terrain.sample_height(point.lon, point.lat).await?;
    let ground_height_m = sampled.filter(|h| h.is_finite()).unwrap_or(0.0);

    let ground = ecef_from_degrees(point.lon, point.lat, ground_height_m);
    let air = ecef_from_degrees(point.lon, point.lat, ground_height_m + point.lift);

    let leader = world.spawn();
    let mut line = PolylineGraphics::new(vec![ground, air]);
    line.width = scale.px_at_least(LEADER_WIDTH_PX, 2);
    line.material = PolylineMaterial::Solid(Color::BLUE.with_alpha(LEADER_ALPHA));
    line.clamp_to_ground = false;
    world.set_polyline(leader, line);

    let marker = world.spawn();
    world.set_transform(marker, Transform::translate(ground));
    world.set_point(
        marker,
        PointGraphics::new(0, Color::RED).with_outline(Color::WHITE, 0),
    );

    let label = world.spawn();
    world.set_transform(label, Transform::translate(air));
    let mut graphics = LabelGraphics::new(point.text.clone(), LabelFont::bold(0));
    graphics.style = LabelStyle::FillAndOutline;
    graphics.fill_color = Color::WHITE;
    graphics.outline_color = Color::BLACK;
    graphics.vertical_origin = VerticalOrigin::Bottom;
    graphics.disable_depth_test_distance = f64::INFINITY;
    world.set_label(label, graphics);

    apply_callout_style(world, marker, scale);
    apply_callout_style(world, label, scale);

    Ok(Callout {
        leader,
        marker,
        label,
        ground_height_m,
    })
}

/// Apply the scale-dependent sizes of callout points and labels.
///
/// Touches the point and label graphics of `entity`, whichever exist;
/// entities with neither are left alone.
pub fn apply_callout_style(world: &mut World, entity: EntityId, scale: UiScale) {
    if let Some(point) = world.point_mut(entity) {
        point.pixel_size = scale.px(MARKER_SIZE_PX);
        point.outline_width = scale.px(MARKER_OUTLINE_PX);
    }
    if let Some(label) = world.label_mut(entity) {
        label.font.size_px = scale.px(LABEL_FONT_PX);
        label.outline_width = scale.px_at_least(LABEL_OUTLINE_PX, 2);
        label.pixel_offset = Vec2::new(0.0, -(scale.px(LABEL_OFFSET_PX) as f64));
        label.scale_by_distance = Some(NearFarScalar::new(
            LABEL_NEAR_M,
            scale.value(),
            LABEL_FAR_M,
            LABEL_FAR_SCALE * scale.value(),
        ));
    }
}
