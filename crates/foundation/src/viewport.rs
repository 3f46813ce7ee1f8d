//! Viewport-derived UI scaling.
//!
//! Marker sizes, line widths and font sizes are all expressed as base pixel
//! values multiplied by a [`UiScale`]. The scale is a pure function of the
//! current [`Viewport`] and is recomputed whenever the viewport changes.

/// Width breakpoint (CSS px) for small screens.
pub const SMALL_MAX_WIDTH_PX: f64 = 600.0;
/// Width breakpoint (CSS px) for tiny screens.
pub const TINY_MAX_WIDTH_PX: f64 = 380.0;
/// Device pixel ratios above this are clamped.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Snapshot of the host viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    /// Layout width in CSS pixels.
    pub width_px: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width_px: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width_px,
            device_pixel_ratio,
        }
    }

    /// Device pixel ratio, defaulting to 1 when unknown and capped at 2.
    pub fn capped_device_pixel_ratio(&self) -> f64 {
        let dpr = if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        };
        dpr.min(MAX_DEVICE_PIXEL_RATIO)
    }
}

/// Multiplier applied to every pixel size in the scene. Always `>= 1.0`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UiScale(f64);

impl UiScale {
    pub const ONE: UiScale = UiScale(1.0);

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            UiScale(value.max(1.0))
        } else {
            UiScale::ONE
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// `base * scale`, rounded to the nearest whole pixel.
    pub fn px(self, base: f64) -> u32 {
        (base * self.0).round().max(0.0) as u32
    }

    /// Like [`UiScale::px`] but never below `min`.
    pub fn px_at_least(self, base: f64, min: u32) -> u32 {
        self.px(base).max(min)
    }

    /// Value written to the `--ui-scale` CSS custom property.
    pub fn css_value(self) -> String {
        self.0.to_string()
    }
}

impl Default for UiScale {
    fn default() -> Self {
        UiScale::ONE
    }
}

/// Breakpoint-based UI scale: 1.4 at <= 380px, 1.25 at <= 600px, else 1.0.
///
/// Only the width is consulted: the device pixel ratio multiplier is 1 at
/// every density, so `viewport.device_pixel_ratio` never changes the result.
pub fn compute_ui_scale(viewport: Viewport) -> UiScale {
    let small = viewport.width_px <= SMALL_MAX_WIDTH_PX;
    let tiny = viewport.width_px <= TINY_MAX_WIDTH_PX;

    let mut base = 1.0;
    if small {
        base = 1.25;
    }
    if tiny {
        base = 1.4;
    }
    UiScale::new(base)
}

#[cfg(test)]
mod tests {
    use super::{UiScale, Viewport, compute_ui_scale};

    #[test]
    fn breakpoints() {
        for width in [0.0, 320.0, 379.5, 380.0] {
            assert_eq!(compute_ui_scale(Viewport::new(width, 1.0)).value(), 1.4);
        }
        for width in [380.5, 414.0, 600.0] {
            assert_eq!(compute_ui_scale(Viewport::new(width, 1.0)).value(), 1.25);
        }
        for width in [600.5, 1280.0, 3840.0] {
            assert_eq!(compute_ui_scale(Viewport::new(width, 1.0)).value(), 1.0);
        }
    }

    #[test]
    fn device_pixel_ratio_does_not_change_scale() {
        for dpr in [0.0, 1.0, 1.5, 2.0, 3.0, f64::NAN] {
            assert_eq!(compute_ui_scale(Viewport::new(1024.0, dpr)).value(), 1.0);
            assert_eq!(compute_ui_scale(Viewport::new(500.0, dpr)).value(), 1.25);
        }
    }

    #[test]
    fn dpr_is_capped_and_defaulted() {
        assert_eq!(Viewport::new(800.0, 3.0).capped_device_pixel_ratio(), 2.0);
        assert_eq!(Viewport::new(800.0, 0.0).capped_device_pixel_ratio(), 1.0);
    }

    #[test]
    fn px_rounds_to_whole_pixels() {
        let s = UiScale::new(1.25);
        assert_eq!(s.px(8.0), 10);
        assert_eq!(s.px(18.0), 23);
        assert_eq!(s.px(25.0), 31);
        assert_eq!(UiScale::new(1.4).px(4.0), 6);
        assert_eq!(UiScale::ONE.px_at_least(2.0, 2), 2);
        assert_eq!(UiScale::new(1.4).px_at_least(3.0, 2), 4);
    }

    #[test]
    fn scale_never_below_one() {
        assert_eq!(UiScale::new(0.5).value(), 1.0);
        assert_eq!(UiScale::new(f64::INFINITY).value(), 1.0);
        assert_eq!(UiScale::new(1.4).css_value(), "1.4");
    }
}
