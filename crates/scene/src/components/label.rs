use foundation::Color;
use foundation::math::Vec2;

/// Font of a label, rendered as a CSS font shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFont {
    pub bold: bool,
    pub size_px: u32,
    pub family: String,
}

impl LabelFont {
    pub fn bold(size_px: u32) -> Self {
        Self {
            bold: true,
            size_px,
            family: "sans-serif".to_string(),
        }
    }

    /// CSS shorthand, e.g. `bold 18px sans-serif`.
    pub fn to_css(&self) -> String {
        if self.bold {
            format!("bold {}px {}", self.size_px, self.family)
        } else {
            format!("{}px {}", self.size_px, self.family)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LabelStyle {
    Fill,
    Outline,
    FillAndOutline,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VerticalOrigin {
    Center,
    Bottom,
    Top,
}

/// Linear interpolation of a value between a near and a far camera distance.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NearFarScalar {
    pub near: f64,
    pub near_value: f64,
    pub far: f64,
    pub far_value: f64,
}

impl NearFarScalar {
    pub fn new(near: f64, near_value: f64, far: f64, far_value: f64) -> Self {
        Self {
            near,
            near_value,
            far,
            far_value,
        }
    }

    /// Value at `distance`, clamped to the near/far values outside the range.
    pub fn evaluate(&self, distance: f64) -> f64 {
        if distance <= self.near || self.far <= self.near {
            return self.near_value;
        }
        if distance >= self.far {
            return self.far_value;
        }
        let t = (distance - self.near) / (self.far - self.near);
        self.near_value + (self.far_value - self.near_value) * t
    }
}

/// Text drawn at the entity position.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelGraphics {
    pub text: String,
    pub font: LabelFont,
    pub style: LabelStyle,
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_width: u32,
    pub vertical_origin: VerticalOrigin,
    pub pixel_offset: Vec2,
    /// Camera distance within which depth testing is skipped.
    pub disable_depth_test_distance: f64,
    pub scale_by_distance: Option<NearFarScalar>,
}

impl LabelGraphics {
    pub fn new(text: impl Into<String>, font: LabelFont) -> Self {
        Self {
            text: text.into(),
            font,
            style: LabelStyle::Fill,
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            outline_width: 1,
            vertical_origin: VerticalOrigin::Center,
            pixel_offset: Vec2::default(),
            disable_depth_test_distance: 0.0,
            scale_by_distance: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelFont, NearFarScalar};

    #[test]
    fn font_css() {
        assert_eq!(LabelFont::bold(23).to_css(), "bold 23px sans-serif");
    }

    #[test]
    fn near_far_interpolates_and_clamps() {
        let s = NearFarScalar::new(300.0, 1.0, 8000.0, 0.7);
        assert_eq!(s.evaluate(10.0), 1.0);
        assert_eq!(s.evaluate(20_000.0), 0.7);
        let mid = s.evaluate(4150.0);
        assert!((mid - 0.85).abs() < 1e-12, "mid = {mid}");
    }
}
