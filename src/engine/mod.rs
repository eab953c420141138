//! Headless grid placement and interaction engine.
//!
//! Everything here operates on a [`crate::model::Layout`] passed in by the
//! caller; rendering and input plumbing live in `crate::app`.

pub mod geometry;
pub mod gesture;
pub mod markup;
pub mod occupancy;
pub mod placement;

pub use geometry::GridMetrics;
pub use gesture::{Gesture, Interaction, Outcome, PointerTarget};
pub use markup::LayoutMarkup;
