//! Small page widgets: the provider logo slider, the logos drawer, feature
//! callouts and the connector reveal animation.

pub mod drawer;
pub mod features;
pub mod reveal;
pub mod slider;

pub use drawer::*;
pub use features::*;
pub use reveal::*;
pub use slider::*;
