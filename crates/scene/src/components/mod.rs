pub mod label;
pub mod point;
pub mod polyline;
pub mod properties;
pub mod transform;
pub mod visibility;

pub use label::*;
pub use point::*;
pub use polyline::*;
pub use properties::*;
pub use transform::*;
pub use visibility::*;
