pub mod bounds;
pub mod layout;
pub mod math;
pub mod time;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use layout::*;
pub use time::*;
