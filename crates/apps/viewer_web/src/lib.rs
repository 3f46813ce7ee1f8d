use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::Viewport;
use formats::{SceneConfig, VectorChunk};
use layers::{Basemap, GUIDE_HOLDER_ID, RouteGroup};
use viewer::{ResizeResponder, SceneSnapshot, StartupError, ViewerContext, build_scene};

mod dom;
mod frames;
mod terrain;

use dom::{log_error, log_js_error, log_warn};
use frames::BrowserFrames;
use terrain::JsTerrainSampler;

const SCENE_JSON: &str = include_str!("../assets/scene.json");
const ROUTE_GEOJSON: &str = include_str!("../assets/route.geojson");

#[derive(Default)]
struct WebState {
    ctx: Option<ViewerContext>,
    resize: ResizeResponder<i32>,
    publish: Option<js_sys::Function>,
}

thread_local! {
    static STATE: RefCell<WebState> = RefCell::new(WebState::default());
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Build the scene and wire the page controls.
///
/// `sample_terrain(lon, lat)` answers ground heights (a number, a promise of
/// one, or `undefined`). `publish(json)` receives every scene snapshot.
/// Empty or missing URLs fall back to the bundled assets.
#[wasm_bindgen]
pub fn init_viewer(
    config_url: Option<String>,
    route_url: Option<String>,
    sample_terrain: js_sys::Function,
    publish: js_sys::Function,
) {
    STATE.with(|state| state.borrow_mut().publish = Some(publish));
    spawn_local(async move {
        if let Err(err) = init_viewer_inner(config_url, route_url, sample_terrain).await {
            log_js_error("viewer init failed", &err);
        }
    });
}

#[wasm_bindgen]
pub fn show_satellite() -> Result<(), JsValue> {
    select_basemap(Basemap::Satellite)
}

#[wasm_bindgen]
pub fn show_standard_map() -> Result<(), JsValue> {
    select_basemap(Basemap::StandardMap)
}

#[wasm_bindgen]
pub fn show_historical_maps() -> Result<(), JsValue> {
    select_basemap(Basemap::HistoricalMaps)
}

#[wasm_bindgen]
pub fn toggle_guide_a() -> Result<(), JsValue> {
    toggle_guide(RouteGroup::A)
}

#[wasm_bindgen]
pub fn toggle_guide_b() -> Result<(), JsValue> {
    toggle_guide(RouteGroup::B)
}

/// Current scene as JSON, or `undefined` before the scene is ready.
#[wasm_bindgen]
pub fn scene_snapshot() -> Result<Option<String>, JsValue> {
    STATE.with(|state| {
        state
            .borrow()
            .ctx
            .as_ref()
            .map(|ctx| SceneSnapshot::capture(ctx).to_json())
            .transpose()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

async fn init_viewer_inner(
    config_url: Option<String>,
    route_url: Option<String>,
    sample_terrain: js_sys::Function,
) -> Result<(), JsValue> {
    let config_text = fetch_or_bundled(config_url, SCENE_JSON).await?;
    let route_text = fetch_or_bundled(route_url, ROUTE_GEOJSON).await?;
    let (config, route) = parse_inputs(&config_text, &route_text).map_err(startup_err)?;

    let terrain = JsTerrainSampler::new(sample_terrain);
    let ctx = build_scene(&config, &route, &terrain, current_viewport())
        .await
        .map_err(startup_err)?;

    dom::set_ui_scale_var(&ctx.scale().css_value())?;
    dom::render_selectors(&ctx.basemaps.selector_states())?;
    let buttons = ctx.guide_buttons();
    let scale = ctx.scale().value();
    STATE.with(|state| state.borrow_mut().ctx = Some(ctx));

    wire_selectors()?;
    wire_guides(&buttons, scale)?;
    wire_resize()?;
    publish_snapshot();
    Ok(())
}

fn parse_inputs(config: &str, route: &str) -> Result<(SceneConfig, VectorChunk), StartupError> {
    Ok((
        SceneConfig::from_json_str(config)?,
        VectorChunk::from_geojson_str(route)?,
    ))
}

fn startup_err(err: StartupError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

async fn fetch_or_bundled(url: Option<String>, bundled: &str) -> Result<String, JsValue> {
    match url.filter(|u| !u.is_empty()) {
        Some(url) => {
            let resp = Request::get(&url)
                .send()
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            if !resp.ok() {
                return Err(JsValue::from_str(&format!(
                    "GET {url} returned {}",
                    resp.status()
                )));
            }
            resp.text()
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))
        }
        None => Ok(bundled.to_string()),
    }
}

fn current_viewport() -> Viewport {
    let window = web_sys::window();
    let width = window
        .as_ref()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let dpr = window.map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    Viewport::new(width, dpr)
}

fn select_basemap(basemap: Basemap) -> Result<(), JsValue> {
    let states = STATE.with(|state| {
        state
            .borrow_mut()
            .ctx
            .as_mut()
            .map(|ctx| ctx.show_basemap(basemap))
    });
    let Some(states) = states else {
        return Ok(());
    };
    dom::render_selectors(&states)?;
    publish_snapshot();
    Ok(())
}

fn toggle_guide(group: RouteGroup) -> Result<(), JsValue> {
    let presentation = STATE.with(|state| {
        state
            .borrow_mut()
            .ctx
            .as_mut()
            .and_then(|ctx| ctx.toggle_guide(group))
    });
    let Some(presentation) = presentation else {
        return Ok(());
    };
    dom::render_button(&presentation)?;
    publish_snapshot();
    Ok(())
}

fn wire_selectors() -> Result<(), JsValue> {
    let doc = dom::document()?;
    for basemap in Basemap::ALL {
        let Some(button) = doc.get_element_by_id(basemap.selector_id()) else {
            log_warn(&format!("#{} not found; selector not wired", basemap.selector_id()));
            continue;
        };
        dom::on_click(&button, move || {
            if let Err(err) = select_basemap(basemap) {
                log_js_error("basemap switch failed", &err);
            }
        })?;
    }
    Ok(())
}

fn wire_guides(buttons: &[layers::ButtonPresentation], scale: f64) -> Result<(), JsValue> {
    if buttons.is_empty() {
        return Ok(());
    }
    let doc = dom::document()?;
    let holder = dom::ensure_guide_holder(&doc, GUIDE_HOLDER_ID)?;
    for presentation in buttons {
        let button = dom::ensure_guide_button(&doc, &holder, presentation.id, scale)?;
        dom::render_button(presentation)?;
        let group = STATE.with(|state| {
            state.borrow().ctx.as_ref().and_then(|ctx| {
                ctx.guides
                    .iter()
                    .find(|g| g.button_id() == presentation.id)
                    .map(|g| g.group())
            })
        });
        let Some(group) = group else {
            continue;
        };
        dom::on_click(&button, move || {
            if let Err(err) = toggle_guide(group) {
                log_js_error("guide toggle failed", &err);
            }
        })?;
    }
    Ok(())
}

fn wire_resize() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let on_resize = Closure::<dyn FnMut()>::new(|| {
        let Some(mut frames) = BrowserFrames::new(on_animation_frame) else {
            return;
        };
        STATE.with(|state| {
            state.borrow_mut().resize.on_resize(&mut frames);
        });
    });
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();
    Ok(())
}

fn on_animation_frame(handle: i32) {
    let viewport = current_viewport();
    let scale = STATE.with(|state| {
        let mut state = state.borrow_mut();
        let WebState { ctx, resize, .. } = &mut *state;
        let ctx = ctx.as_mut()?;
        resize.on_frame(handle, ctx, viewport)
    });
    let Some(scale) = scale else {
        return;
    };
    if let Err(err) = dom::set_ui_scale_var(&scale.css_value()) {
        log_js_error("ui scale update failed", &err);
    }
    publish_snapshot();
}

fn publish_snapshot() {
    let (json, publish) = STATE.with(|state| {
        let state = state.borrow();
        let json = state
            .ctx
            .as_ref()
            .map(|ctx| SceneSnapshot::capture(ctx).to_json());
        (json, state.publish.clone())
    });
    let (Some(json), Some(publish)) = (json, publish) else {
        return;
    };
    match json {
        Ok(json) => {
            if let Err(err) = publish.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log_js_error("publish failed", &err);
            }
        }
        Err(err) => log_error(&format!("snapshot encode failed: {err}")),
    }
}
