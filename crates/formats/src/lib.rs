pub mod route_ingest;
pub mod scene_config;
pub mod vector_chunk;

pub use route_ingest::*;
pub use scene_config::*;
pub use vector_chunk::*;
