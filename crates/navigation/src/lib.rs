//! Scroll-driven active-section tracking for the page header.
//!
//! [`ActiveSectionTracker`] is the state machine; [`NavigationController`]
//! feeds it browser events through the `runtime` gates and renders its
//! decisions onto a [`NavSurface`].

pub mod active;
pub mod config;
pub mod controller;
pub mod extent;
pub mod indicator;
pub mod menu;
pub mod surface;
pub mod tracker;

#[cfg(test)]
mod testing;

pub use active::*;
pub use config::*;
pub use controller::*;
pub use extent::*;
pub use indicator::*;
pub use menu::*;
pub use surface::*;
pub use tracker::*;
