use foundation::Color;
use foundation::math::Vec3;

/// Surface appearance of a polyline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PolylineMaterial {
    Solid(Color),
    Dash {
        color: Color,
        gap_color: Color,
        /// Dash pattern length in pixels.
        dash_length: f64,
    },
    /// Line drawn with an arrow head at its last vertex.
    Arrow(Color),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HeightReference {
    None,
    ClampToGround,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineGraphics {
    pub positions: Vec<Vec3>,
    pub width: u32,
    pub material: PolylineMaterial,
    pub clamp_to_ground: bool,
    pub height_reference: HeightReference,
}

impl PolylineGraphics {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            width: 1,
            material: PolylineMaterial::Solid(Color::WHITE),
            clamp_to_ground: false,
            height_reference: HeightReference::None,
        }
    }
}
