//! Serializable view of a [`ViewerContext`] for the rendering host.
//!
//! Positions are converted back to longitude/latitude degrees and meters of
//! height; colors are CSS `rgba(...)` strings.

use foundation::math::{Ecef, Vec3, ecef_to_geodetic};
use formats::{ImagerySource, ViewerOptions};
use scene::World;
use scene::components::{
    HeightReference, LabelGraphics, LabelStyle, PolylineGraphics, PolylineMaterial,
    VerticalOrigin,
};
use scene::entity::EntityId;
use serde::Serialize;

use crate::context::{FlyTo, ViewerContext};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub options: ViewerOptions,
    pub ui_scale: f64,
    /// Bottom to top.
    pub imagery: Vec<ImagerySnapshot>,
    pub selected_basemap: &'static str,
    pub entities: Vec<EntitySnapshot>,
    pub data_sources: Vec<DataSourceSnapshot>,
    pub guides: Vec<GuideButtonSnapshot>,
    pub fly_to: Option<FlyTo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImagerySnapshot {
    pub source: ImagerySource,
    pub show: bool,
    pub alpha: f32,
    pub brightness: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceSnapshot {
    pub name: String,
    pub entities: Vec<EntitySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideButtonSnapshot {
    pub id: &'static str,
    pub text: &'static str,
    pub background: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub show: bool,
    /// `[lon_deg, lat_deg, height_m]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<PointSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyline: Option<PolylineSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointSnapshot {
    pub pixel_size: u32,
    pub color: String,
    pub outline_color: String,
    pub outline_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSnapshot {
    pub text: String,
    pub font: String,
    pub style: &'static str,
    pub fill_color: String,
    pub outline_color: String,
    pub outline_width: u32,
    pub vertical_origin: &'static str,
    pub pixel_offset: [f64; 2],
    /// `None` means depth testing is disabled at every distance.
    pub disable_depth_test_distance: Option<f64>,
    /// `[near_m, near_scale, far_m, far_scale]`.
    pub scale_by_distance: Option<[f64; 4]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolylineSnapshot {
    pub positions: Vec<[f64; 3]>,
    pub width: u32,
    pub material: MaterialSnapshot,
    pub clamp_to_ground: bool,
    pub height_reference: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaterialSnapshot {
    Solid {
        color: String,
    },
    Dash {
        color: String,
        gap_color: String,
        dash_length: f64,
    },
    Arrow {
        color: String,
    },
}

impl SceneSnapshot {
    pub fn capture(ctx: &ViewerContext) -> Self {
        Self {
            options: ctx.options.clone(),
            ui_scale: ctx.scale().value(),
            imagery: ctx
                .imagery
                .iter()
                .map(|layer| ImagerySnapshot {
                    source: layer.source.clone(),
                    show: layer.show,
                    alpha: layer.alpha,
                    brightness: layer.brightness,
                })
                .collect(),
            selected_basemap: ctx.basemaps.selected().selector_id(),
            entities: snapshot_world(&ctx.entities),
            data_sources: vec![DataSourceSnapshot {
                name: ctx.route.name.clone(),
                entities: snapshot_world(&ctx.route.entities),
            }],
            guides: ctx
                .guide_buttons()
                .into_iter()
                .map(|b| GuideButtonSnapshot {
                    id: b.id,
                    text: b.text,
                    background: b.background,
                    active: b.active,
                })
                .collect(),
            fly_to: ctx.fly_to,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn snapshot_world(world: &World) -> Vec<EntitySnapshot> {
    world.entities().map(|id| snapshot_entity(world, id)).collect()
}

fn snapshot_entity(world: &World, id: EntityId) -> EntitySnapshot {
    EntitySnapshot {
        id: id.index(),
        name: world.name(id).map(str::to_string),
        show: world.is_shown(id),
        position: world.transform(id).map(|t| to_degrees(t.position)),
        point: world.point(id).map(|p| PointSnapshot {
            pixel_size: p.pixel_size,
            color: p.color.to_css(),
            outline_color: p.outline_color.to_css(),
            outline_width: p.outline_width,
        }),
        label: world.label(id).map(snapshot_label),
        polyline: world.polyline(id).map(snapshot_polyline),
    }
}

fn snapshot_label(label: &LabelGraphics) -> LabelSnapshot {
    LabelSnapshot {
        text: label.text.clone(),
        font: label.font.to_css(),
        style: match label.style {
            LabelStyle::Fill => "fill",
            LabelStyle::Outline => "outline",
            LabelStyle::FillAndOutline => "fill_and_outline",
        },
        fill_color: label.fill_color.to_css(),
        outline_color: label.outline_color.to_css(),
        outline_width: label.outline_width,
        vertical_origin: match label.vertical_origin {
            VerticalOrigin::Center => "center",
            VerticalOrigin::Bottom => "bottom",
            VerticalOrigin::Top => "top",
        },
        pixel_offset: [label.pixel_offset.x, label.pixel_offset.y],
        disable_depth_test_distance: Some(label.disable_depth_test_distance)
            .filter(|d| d.is_finite()),
        scale_by_distance: label
            .scale_by_distance
            .map(|s| [s.near, s.near_value, s.far, s.far_value]),
    }
}

fn snapshot_polyline(line: &PolylineGraphics) -> PolylineSnapshot {
    PolylineSnapshot {
        positions: line.positions.iter().copied().map(to_degrees).collect(),
        width: line.width,
        material: match line.material {
            PolylineMaterial::Solid(color) => MaterialSnapshot::Solid {
                color: color.to_css(),
            },
            PolylineMaterial::Dash {
                color,
                gap_color,
                dash_length,
            } => MaterialSnapshot::Dash {
                color: color.to_css(),
                gap_color: gap_color.to_css(),
                dash_length,
            },
            PolylineMaterial::Arrow(color) => MaterialSnapshot::Arrow {
                color: color.to_css(),
            },
        },
        clamp_to_ground: line.clamp_to_ground,
        height_reference: match line.height_reference {
            HeightReference::None => "none",
            HeightReference::ClampToGround => "clamp_to_ground",
        },
    }
}

fn to_degrees(position: Vec3) -> [f64; 3] {
    let geo = ecef_to_geodetic(Ecef::new(position.x, position.y, position.z));
    [geo.lon_rad.to_degrees(), geo.lat_rad.to_degrees(), geo.alt_m]
}

#[cfg(test)]
mod tests {
    use super::{MaterialSnapshot, SceneSnapshot};
    use crate::startup::build_scene;
    use foundation::Viewport;
    use formats::{CalloutPoint, SceneConfig, VectorChunk};
    use layers::{EllipsoidTerrain, RouteGroup};
    use pretty_assertions::assert_eq;

    const ROUTE: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"A"},"geometry":null},
        {"type":"Feature","properties":{"name":"B","style":"arrow"},
         "geometry":{"type":"LineString","coordinates":[[135.66,35.02,80],[135.67,35.03,90]]}}
    ]}"#;

    fn snapshot() -> SceneSnapshot {
        let config = SceneConfig {
            callouts: vec![CalloutPoint::new(135.6778, 35.0129, 250.0, "渡月橋")],
            ..SceneConfig::default()
        };
        let route = VectorChunk::from_geojson_str(ROUTE).expect("route");
        let mut ctx = pollster::block_on(build_scene(
            &config,
            &route,
            &EllipsoidTerrain,
            Viewport::new(1280.0, 1.0),
        ))
        .expect("scene");
        ctx.toggle_guide(RouteGroup::B);
        SceneSnapshot::capture(&ctx)
    }

    #[test]
    fn positions_come_back_in_degrees() {
        let snap = snapshot();
        let label = snap
            .entities
            .iter()
            .find(|e| e.label.is_some())
            .expect("label entity");
        let [lon, lat, h] = label.position.expect("label position");
        assert!((lon - 135.6778).abs() < 1e-7);
        assert!((lat - 35.0129).abs() < 1e-7);
        assert!((h - 250.0).abs() < 1e-2);

        let arrow = snap.data_sources[0]
            .entities
            .iter()
            .find_map(|e| e.polyline.as_ref())
            .expect("arrow");
        assert_eq!(arrow.positions.len(), 2);
        assert!((arrow.positions[1][2] - 90.0).abs() < 1e-2);
        assert_eq!(
            arrow.material,
            MaterialSnapshot::Arrow {
                color: "rgba(255,255,0,0.5)".to_string()
            }
        );
        assert!(!arrow.clamp_to_ground);
        assert_eq!(arrow.height_reference, "none");
    }

    #[test]
    fn controls_and_imagery_are_published() {
        let snap = snapshot();
        assert_eq!(snap.selected_basemap, "btn-satellite");
        let shown: Vec<bool> = snap.imagery.iter().map(|l| l.show).collect();
        assert_eq!(shown, vec![true, false, false, false]);
        assert!(snap.imagery.iter().all(|l| l.brightness == 0.95));
        assert_eq!(snap.guides.len(), 1);
        assert_eq!(snap.guides[0].text, "→:OFF");
        let source = &snap.data_sources[0];
        assert_eq!(source.name, "route");
        assert!(source.entities.iter().all(|e| e.polyline.is_none() || !e.show));
    }

    #[test]
    fn json_has_no_infinities() {
        let json = snapshot().to_json().expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("reparse");
        let label = value["entities"]
            .as_array()
            .and_then(|es| es.iter().find(|e| e.get("label").is_some()))
            .expect("label entity");
        assert!(label["label"]["disable_depth_test_distance"].is_null());
        assert_eq!(label["label"]["font"], "bold 18px sans-serif");
        assert_eq!(label["label"]["vertical_origin"], "bottom");
        assert_eq!(value["imagery"][0]["source"]["kind"], "ion");
        let arrow = value["data_sources"][0]["entities"]
            .as_array()
            .and_then(|es| es.iter().find(|e| e.get("polyline").is_some()))
            .expect("arrow entity");
        assert_eq!(arrow["polyline"]["height_reference"], "none");
    }
}
