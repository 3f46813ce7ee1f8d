use foundation::{Viewport, compute_ui_scale};
use formats::{SceneConfig, VectorChunk, ingest_route};
use layers::{
    BasemapManager, GuideToggle, ImageryLayerCollection, RouteGroup, RouteOverlay,
    TerrainSampler, add_callout,
};
use scene::World;
use tracing::{debug, info};

use crate::context::{DataSource, FlyTo, ViewerContext};
use crate::error::StartupError;

/// Build the whole scene from a config, the parsed route and a terrain
/// provider.
///
/// Steps run in a fixed order: scale, basemaps, route, callouts, camera,
/// guides. Callouts are added one at a time, each after its terrain sample
/// resolves, so they land in config order. Any error aborts the build and
/// nothing is returned.
pub async fn build_scene<T: TerrainSampler>(
    config: &SceneConfig,
    route: &VectorChunk,
    terrain: &T,
    viewport: Viewport,
) -> Result<ViewerContext, StartupError> {
    config.validate()?;

    let scale = compute_ui_scale(viewport);
    debug!(
        width_px = viewport.width_px,
        scale = scale.value(),
        "ui scale computed"
    );

    // Starts empty: the host's default base layer is never part of the scene.
    let mut imagery = ImageryLayerCollection::new();
    let basemaps = BasemapManager::install(&mut imagery, &config.imagery);
    info!(layers = imagery.len(), "imagery installed");

    let mut data_source = DataSource::new(&config.route_name);
    let ingested = ingest_route(&mut data_source.entities, route);
    let overlay = RouteOverlay::style(&mut data_source.entities, scale);
    info!(
        source = %data_source.name,
        entities = ingested.len(),
        arrows = overlay.group(RouteGroup::B).len(),
        route_lines = overlay.group(RouteGroup::A).len(),
        "route loaded"
    );

    let mut entities = World::new();
    let mut callouts = Vec::with_capacity(config.callouts.len());
    for point in &config.callouts {
        let callout = add_callout(&mut entities, terrain, point, scale).await?;
        debug!(
            text = %point.text,
            ground_m = callout.ground_height_m,
            "callout added"
        );
        callouts.push(callout);
    }

    let fly_to = route.bounds_deg().map(FlyTo::from_bounds);

    let mut guides = Vec::new();
    if config.guides.route_toggle {
        guides.push(GuideToggle::route());
    }
    if config.guides.arrows_toggle {
        guides.push(GuideToggle::arrows());
    }
    overlay.set_group_visible(&mut data_source.entities, RouteGroup::A, true);
    overlay.set_group_visible(&mut data_source.entities, RouteGroup::B, true);

    info!(callouts = callouts.len(), guides = guides.len(), "scene ready");

    Ok(ViewerContext {
        options: config.viewer.clone(),
        entities,
        route: data_source,
        overlay,
        imagery,
        basemaps,
        guides,
        callouts,
        fly_to,
        scale,
    })
}
