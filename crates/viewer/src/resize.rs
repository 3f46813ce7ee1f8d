use foundation::{UiScale, Viewport, compute_ui_scale};
use runtime::{FrameDebounce, FrameHost};
use tracing::debug;

use crate::context::ViewerContext;

/// Collapses bursts of viewport resizes into one restyle per frame.
#[derive(Debug)]
pub struct ResizeResponder<H> {
    debounce: FrameDebounce<H>,
    passes: u64,
}

impl<H: Copy + PartialEq + std::fmt::Debug> ResizeResponder<H> {
    pub fn new() -> Self {
        Self {
            debounce: FrameDebounce::new(),
            passes: 0,
        }
    }

    /// Number of restyle passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn pending(&self) -> Option<H> {
        self.debounce.pending()
    }

    /// A resize happened: replace any pending frame request with a new one.
    pub fn on_resize<F: FrameHost<Handle = H>>(&mut self, host: &mut F) -> H {
        self.debounce.schedule(host)
    }

    /// A frame fired. Restyles `ctx` for `viewport` and returns the new scale
    /// if `handle` is the live request; stale frames do nothing.
    pub fn on_frame(
        &mut self,
        handle: H,
        ctx: &mut ViewerContext,
        viewport: Viewport,
    ) -> Option<UiScale> {
        if !self.debounce.fire(handle) {
            return None;
        }
        let scale = compute_ui_scale(viewport);
        ctx.restyle(scale);
        self.passes += 1;
        debug!(width_px = viewport.width_px, scale = scale.value(), "resize applied");
        Some(scale)
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> Default for ResizeResponder<H> {
    fn default() -> Self {
        Self::new()
    }
}
