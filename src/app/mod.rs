//! Application layer
//!
//! Configuration, the backend-agnostic frame driver and its winit runner.

pub mod config;
mod driver;
mod runner;
mod window;

pub use config::{AppConfig, TimingConfig, WindowConfig};
pub use driver::{FrameDriver, FrameOutcome, Placement};
pub use runner::{App, FrameHook};
pub use window::window_attributes_from_config;
