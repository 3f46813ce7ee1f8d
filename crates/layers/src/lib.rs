pub mod basemap;
pub mod callout;
pub mod guides;
pub mod layer;
pub mod raster;
pub mod route;
pub mod terrain;

pub use basemap::*;
pub use callout::*;
pub use guides::*;
pub use layer::*;
pub use raster::*;
pub use route::*;
pub use terrain::*;
