use js_sys::{Function, Promise};
use layers::{TerrainError, TerrainSampler};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::js_error_text;

/// Terrain sampled by the page: `sample(lon, lat)` returns a height, a
/// promise of one, or `undefined` when the provider has nothing there.
pub struct JsTerrainSampler {
    sample: Function,
}

impl JsTerrainSampler {
    pub fn new(sample: Function) -> Self {
        Self { sample }
    }
}

impl TerrainSampler for JsTerrainSampler {
    async fn sample_height(&self, lon_deg: f64, lat_deg: f64) -> Result<Option<f64>, TerrainError> {
        let failed = |err: JsValue| TerrainError::Sample {
            lon_deg,
            lat_deg,
            reason: js_error_text(&err),
        };
        let answer = self
            .sample
            .call2(&JsValue::NULL, &lon_deg.into(), &lat_deg.into())
            .map_err(failed)?;
        let height = JsFuture::from(Promise::resolve(&answer))
            .await
            .map_err(failed)?;
        Ok(height.as_f64())
    }
}
