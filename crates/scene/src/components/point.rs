use foundation::Color;

/// Screen-space point marker drawn at the entity position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointGraphics {
    pub pixel_size: u32,
    pub color: Color,
    pub outline_color: Color,
    pub outline_width: u32,
}

impl PointGraphics {
    pub fn new(pixel_size: u32, color: Color) -> Self {
        Self {
            pixel_size,
            color,
            outline_color: Color::BLACK,
            outline_width: 0,
        }
    }

    pub fn with_outline(mut self, color: Color, width: u32) -> Self {
        self.outline_color = color;
        self.outline_width = width;
        self
    }
}
