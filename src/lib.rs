//! frame-ui
//!
//! Frame-stepped input tracking, a 2D camera and immediate widgets for small
//! games, drawn through an abstract surface.

/// Configuration, frame driver and winit runner
pub mod app;

/// World to screen camera
pub mod camera;

/// Drawing surface, colors and camera-relative helpers
pub mod draw;

/// Candidate filtering for searchable lists
pub mod fuzzy;

pub mod geometry;

/// Raw events, per-control key states and the per-frame snapshot
pub mod input;

/// Interactive widgets
pub mod widgets;

mod error;

pub use error::{Error, Result};
