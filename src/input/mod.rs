//! Input handling
//!
//! Turns a raw event stream into one read-only snapshot per frame:
//!
//! ```text
//! Raw input (winit) → InputCollector → Vec<RawEvent> + PointerSample
//!                                          ↓
//!                                   InputSnapshot::refresh
//!                                          ↓
//!                        Camera::update, Widget::update (read only)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! // In window_event()
//! collector.handle_window_event(&event);
//!
//! // Once per frame
//! let (events, pointer) = collector.take_frame();
//! if !snapshot.refresh(events, pointer) {
//!     // quit requested
//! }
//! ```

mod collector;
mod control;
mod events;
mod repeat;
mod snapshot;
mod state;

pub use collector::InputCollector;
pub use control::Control;
pub use events::{KeyCode, PointerSample, RawEvent};
pub use repeat::KeyRepeat;
pub use snapshot::InputSnapshot;
pub use state::{Edge, KeyStatus};
