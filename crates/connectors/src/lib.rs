//! Keeps SVG connector lines glued to the feature labels they annotate.
//!
//! Every pass re-measures the page, computes a [`ConnectorPlan`] with the
//! pure functions in [`plan`], and hands it to a [`ConnectorSurface`] to write.
//! Nothing measured is kept between passes.

pub mod anchor;
pub mod config;
pub mod controller;
pub mod geometry;
pub mod plan;
pub mod presence;
pub mod surface;
pub mod sync;

#[cfg(test)]
mod testing;

pub use anchor::*;
pub use config::*;
pub use controller::*;
pub use geometry::*;
pub use plan::*;
pub use presence::*;
pub use surface::*;
pub use sync::*;
