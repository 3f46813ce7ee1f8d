use foundation::Color;
use foundation::math::ecef_from_degrees;
use scene::World;
use scene::components::{
    ComponentProperties, PointGraphics, PolylineGraphics, PolylineMaterial, Transform,
};
use scene::entity::EntityId;
use serde_json::Value;

use crate::vector_chunk::{GeoPoint, VectorChunk, VectorFeature, VectorGeometry};

/// Default line width of freshly loaded line features, before styling.
pub const DEFAULT_LINE_WIDTH: u32 = 2;
/// Default marker size of freshly loaded point features.
pub const DEFAULT_MARKER_SIZE: u32 = 10;

/// Load a feature collection into `world`, one entity per drawable part.
///
/// Line strings become polylines (a multi-line feature yields one entity per
/// line), points become point markers, and null-geometry features become bare
/// entities carrying only their name and properties. Areas are not drawn.
/// Returns the spawned entities in feature order.
pub fn ingest_route(world: &mut World, chunk: &VectorChunk) -> Vec<EntityId> {
    let mut out = Vec::new();
    for feature in &chunk.features {
        match &feature.geometry {
            None => out.push(spawn_feature_entity(world, feature)),
            Some(VectorGeometry::Point(p)) => out.push(ingest_point(world, feature, p)),
            Some(VectorGeometry::MultiPoint(points)) => {
                for p in points {
                    out.push(ingest_point(world, feature, p));
                }
            }
            Some(geometry @ (VectorGeometry::LineString(_) | VectorGeometry::MultiLineString(_))) => {
                for line in geometry.lines() {
                    if let Some(entity) = ingest_line(world, feature, line) {
                        out.push(entity);
                    }
                }
            }
            Some(VectorGeometry::Polygon(_) | VectorGeometry::MultiPolygon(_)) => {}
        }
    }
    out
}

fn spawn_feature_entity(world: &mut World, feature: &VectorFeature) -> EntityId {
    let entity = world.spawn();
    if let Some(name) = feature.name() {
        world.set_name(entity, name);
    }
    world.set_properties(entity, properties_of(feature));
    entity
}

fn ingest_point(world: &mut World, feature: &VectorFeature, p: &GeoPoint) -> EntityId {
    let entity = spawn_feature_entity(world, feature);
    world.set_transform(
        entity,
        Transform::from_degrees(p.lon_deg, p.lat_deg, p.height_m.unwrap_or(0.0)),
    );
    world.set_point(entity, PointGraphics::new(DEFAULT_MARKER_SIZE, Color::YELLOW));
    entity
}

fn ingest_line(world: &mut World, feature: &VectorFeature, line: &[GeoPoint]) -> Option<EntityId> {
    if line.len() < 2 {
        return None;
    }
    let positions = line
        .iter()
        .map(|p| ecef_from_degrees(p.lon_deg, p.lat_deg, p.height_m.unwrap_or(0.0)))
        .collect();

    let entity = spawn_feature_entity(world, feature);
    let mut polyline = PolylineGraphics::new(positions);
    polyline.width = DEFAULT_LINE_WIDTH;
    polyline.material = PolylineMaterial::Solid(Color::YELLOW);
    world.set_polyline(entity, polyline);
    Some(entity)
}

fn properties_of(feature: &VectorFeature) -> ComponentProperties {
    let pairs = feature
        .properties
        .iter()
        .filter_map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                Value::Null => return None,
                other => other.to_string(),
            };
            Some((k.clone(), value))
        })
        .collect();
    ComponentProperties::new(pairs)
}
