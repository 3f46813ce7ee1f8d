pub mod color;
pub mod handles;
pub mod math;
pub mod viewport;

// Foundation crate: small, well-tested primitives only.
pub use color::*;
pub use handles::*;
pub use viewport::*;
