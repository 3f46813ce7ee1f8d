use std::cell::Cell;
use std::rc::Rc;

use runtime::FrameHost;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::dom::log_js_error;

/// `requestAnimationFrame` backed frame host. Each request gets its own
/// one-shot callback that reports the id it was scheduled under.
pub struct BrowserFrames {
    window: web_sys::Window,
    on_frame: fn(i32),
}

impl BrowserFrames {
    pub fn new(on_frame: fn(i32)) -> Option<Self> {
        web_sys::window().map(|window| Self { window, on_frame })
    }
}

impl FrameHost for BrowserFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> i32 {
        let id = Rc::new(Cell::new(0));
        let seen = id.clone();
        let on_frame = self.on_frame;
        let callback = Closure::once_into_js(move |_ts: f64| on_frame(seen.get()));
        match self
            .window
            .request_animation_frame(callback.unchecked_ref())
        {
            Ok(handle) => {
                id.set(handle);
                handle
            }
            Err(err) => {
                log_js_error("requestAnimationFrame failed", &err);
                0
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(err) = self.window.cancel_animation_frame(handle) {
            log_js_error("cancelAnimationFrame failed", &err);
        }
    }
}
