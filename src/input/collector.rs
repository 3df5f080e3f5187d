//! Raw input collection from winit events

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;

use super::events::{KeyCode, PointerSample, RawEvent};

/// Pixel distance treated as one wheel notch for touchpads
const PIXELS_PER_LINE: f32 = 20.0;

/// Collects winit window events into a per-frame raw event queue
///
/// Events are queued as they arrive and drained once per frame with
/// [`InputCollector::take_frame`], which also samples the pointer.
pub struct InputCollector {
    queue: Vec<RawEvent>,
    scale_factor: f32,
    cursor: Vec2,
    last_cursor: Vec2,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            scale_factor: 1.0,
            cursor: Vec2::ZERO,
            last_cursor: Vec2::ZERO,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f32) {
        self.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.queue.push(RawEvent::Quit),

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let index = match button {
                    MouseButton::Left => 1,
                    MouseButton::Middle => 2,
                    MouseButton::Right => 3,
                    _ => return,
                };
                self.queue.push(match state {
                    ElementState::Pressed => RawEvent::MouseDown(index),
                    ElementState::Released => RawEvent::MouseUp(index),
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Convert to wheel notches; positive scrolls away from the user
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                if lines != 0.0 {
                    self.queue.push(RawEvent::MouseWheel(lines));
                }
            }

            WindowEvent::Resized(size) => {
                let logical = Vec2::new(size.width as f32, size.height as f32) / self.scale_factor;
                self.queue.push(RawEvent::Resized(logical));
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor as f32);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state == ElementState::Pressed;

                // OS auto-repeat is ignored for edges; widgets run their own repeat timers
                if let PhysicalKey::Code(code) = event.physical_key
                    && !event.repeat
                {
                    let key = KeyCode::from(code);
                    self.queue.push(if pressed {
                        RawEvent::KeyDown(key)
                    } else {
                        RawEvent::KeyUp(key)
                    });
                }

                if pressed && let Some(text) = &event.text {
                    self.push_text(text);
                }
            }

            _ => {}
        }
    }

    /// Records a cursor position in physical pixels
    pub fn cursor_moved(&mut self, physical: Vec2) {
        self.cursor = physical / self.scale_factor;
    }

    /// Queues committed text, dropping control characters
    pub fn push_text(&mut self, text: &str) {
        let printable: String = text.chars().filter(|c| !c.is_control()).collect();
        if !printable.is_empty() {
            self.queue.push(RawEvent::TextInput(printable));
        }
    }

    /// Queues an already translated event
    pub fn push(&mut self, event: RawEvent) {
        self.queue.push(event);
    }

    /// Drains this frame's events and samples the pointer
    pub fn take_frame(&mut self) -> (Vec<RawEvent>, PointerSample) {
        let pointer = PointerSample::new(self.cursor, self.cursor - self.last_cursor);
        self.last_cursor = self.cursor;
        (std::mem::take(&mut self.queue), pointer)
    }

    /// Number of events waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}
