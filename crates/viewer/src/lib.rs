//! Scene orchestration for the route viewer.
//!
//! The rendering host (browser or native driver) owns the globe; this crate
//! owns what goes on it and publishes it as a [`SceneSnapshot`].

pub mod context;
pub mod error;
pub mod resize;
pub mod snapshot;
pub mod startup;

pub use context::*;
pub use error::*;
pub use resize::*;
pub use snapshot::*;
pub use startup::*;
