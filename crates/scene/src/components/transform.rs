use foundation::math::{Vec3, ecef_from_degrees};

/// World position of an entity (ECEF meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn translate(position: Vec3) -> Self {
        Self { position }
    }

    pub fn from_degrees(lon_deg: f64, lat_deg: f64, height_m: f64) -> Self {
        Self::translate(ecef_from_degrees(lon_deg, lat_deg, height_m))
    }
}
