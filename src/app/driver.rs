//! Backend-agnostic frame loop
//!
//! One [`FrameDriver::tick`] per frame refreshes the input snapshot, applies
//! window resizes and camera input, then updates every registered widget in
//! registration order.

use std::time::Duration;

use glam::Vec2;
use tracing::{debug, info, trace};

use crate::camera::Camera;
use crate::draw::{Surface, TextMetrics};
use crate::input::{Control, InputSnapshot, PointerSample, RawEvent};
use crate::widgets::{FrameContext, Widget};

/// Coordinate space a widget lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Fixed to the window
    Screen,
    /// Moves and scales with the camera
    World,
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutcome {
    /// False once a quit was requested
    pub running: bool,
    /// True if anything visible changed this frame
    pub redraw: bool,
    /// New window size if the window was resized
    pub resized: Option<Vec2>,
}

impl FrameOutcome {
    fn stopped() -> Self {
        Self {
            running: false,
            redraw: false,
            resized: None,
        }
    }
}

struct WidgetSlot {
    name: String,
    placement: Placement,
    widget: Box<dyn Widget>,
}

/// Owns the input snapshot, the optional camera and the widgets
pub struct FrameDriver {
    input: InputSnapshot,
    camera: Option<Camera>,
    slots: Vec<WidgetSlot>,
    quit_on_escape: bool,
    first_frame: bool,
}

impl FrameDriver {
    pub fn new() -> Self {
        Self {
            input: InputSnapshot::new(),
            camera: None,
            slots: Vec::new(),
            quit_on_escape: false,
            first_frame: true,
        }
    }

    /// Builder method to attach a camera for world-placed widgets
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Builder method to stop the loop when Escape is pressed
    pub fn with_quit_on_escape(mut self, enabled: bool) -> Self {
        self.quit_on_escape = enabled;
        self
    }

    /// Register a widget
    ///
    /// Widgets update and draw in registration order. World placement
    /// without a camera behaves like screen placement.
    pub fn register(&mut self, name: impl Into<String>, placement: Placement, widget: Box<dyn Widget>) {
        let name = name.into();
        debug!(name = %name, ?placement, "Widget registered");
        self.slots.push(WidgetSlot {
            name,
            placement,
            widget,
        });
    }

    /// Looks up a registered widget by name and concrete type
    pub fn widget<T: Widget + 'static>(&self, name: &str) -> Option<&T> {
        self.slots
            .iter()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.widget.as_any().downcast_ref::<T>())
    }

    pub fn widget_mut<T: Widget + 'static>(&mut self, name: &str) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|slot| slot.name == name)
            .and_then(|slot| slot.widget.as_any_mut().downcast_mut::<T>())
    }

    pub fn input(&self) -> &InputSnapshot {
        &self.input
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        self.camera.as_mut()
    }

    /// Advances one frame
    pub fn tick<I>(
        &mut self,
        events: I,
        pointer: PointerSample,
        delta: Duration,
        metrics: &dyn TextMetrics,
    ) -> FrameOutcome
    where
        I: IntoIterator<Item = RawEvent>,
    {
        if !self.input.refresh(events, pointer) {
            info!("Quit event received, stopping");
            return FrameOutcome::stopped();
        }
        if self.quit_on_escape && self.input.status(Control::Escape).is_pressed() {
            info!("Escape pressed, stopping");
            return FrameOutcome::stopped();
        }

        let resized = self.input.resized();
        let mut redraw = std::mem::take(&mut self.first_frame) || resized.is_some();

        if let Some(camera) = &mut self.camera {
            camera.update(&self.input);
            // A same-size resize would clear the zoom's size flag
            if let Some(size) = resized
                && size != camera.resolution()
            {
                camera.resize(size);
            }
            redraw |= camera.changed();
        }

        let screen = FrameContext::new(&self.input, delta, metrics);
        for slot in &mut self.slots {
            let ctx = match (slot.placement, &self.camera) {
                (Placement::World, Some(camera)) => screen.with_camera(camera),
                _ => screen,
            };
            slot.widget.update(&ctx);
            if slot.widget.changed() {
                trace!(name = %slot.name, "Widget changed");
                redraw = true;
            }
        }

        FrameOutcome {
            running: true,
            redraw,
            resized,
        }
    }

    /// Draws every visible widget
    pub fn draw(&self, surface: &mut dyn Surface) {
        for slot in self.slots.iter().filter(|slot| slot.widget.visible()) {
            let camera = match slot.placement {
                Placement::World => self.camera.as_ref(),
                Placement::Screen => None,
            };
            slot.widget.draw(surface, camera);
        }
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawList, MonospaceMetrics, color};
    use crate::input::KeyCode;
    use crate::widgets::{Button, CircularPad, MultiBox, Slider};

    const FRAME: Duration = Duration::from_millis(16);

    fn tick(driver: &mut FrameDriver, events: Vec<RawEvent>, at: Vec2) -> FrameOutcome {
        driver.tick(events, PointerSample::at(at), FRAME, &MonospaceMetrics)
    }

    fn button() -> Box<Button> {
        Box::new(Button::new(Vec2::ZERO, Vec2::new(50.0, 50.0), color::INDIAN_RED))
    }

    #[test]
    fn test_redraws_first_frame_then_idles() {
        let mut driver = FrameDriver::new();
        driver.register("ok", Placement::Screen, button());
        let away = Vec2::new(500.0, 500.0);
        assert!(tick(&mut driver, vec![], away).redraw);
        let idle = tick(&mut driver, vec![], away);
        assert!(idle.running);
        assert!(!idle.redraw);
    }

    #[test]
    fn test_widget_change_requests_redraw() {
        let mut driver = FrameDriver::new();
        driver.register("ok", Placement::Screen, button());
        tick(&mut driver, vec![], Vec2::new(500.0, 500.0));
        let outcome = tick(&mut driver, vec![RawEvent::MouseDown(1)], Vec2::new(10.0, 10.0));
        assert!(outcome.redraw);
        assert!(driver.widget::<Button>("ok").is_some_and(Button::is_pressed));
        assert!(driver.widget::<Button>("missing").is_none());
    }

    #[test]
    fn test_quit_and_escape_stop_the_loop() {
        let mut driver = FrameDriver::new();
        assert!(tick(&mut driver, vec![RawEvent::KeyDown(KeyCode::Escape)], Vec2::ZERO).running);

        let mut driver = FrameDriver::new().with_quit_on_escape(true);
        assert!(!tick(&mut driver, vec![RawEvent::KeyDown(KeyCode::Escape)], Vec2::ZERO).running);

        let mut driver = FrameDriver::new();
        let outcome = tick(&mut driver, vec![RawEvent::Quit], Vec2::ZERO);
        assert_eq!(outcome, FrameOutcome::stopped());
    }

    #[test]
    fn test_resize_reaches_the_camera() {
        let mut driver = FrameDriver::new().with_camera(Camera::new(Vec2::new(800.0, 600.0)));
        tick(&mut driver, vec![], Vec2::ZERO);
        let outcome = tick(
            &mut driver,
            vec![RawEvent::Resized(Vec2::new(1000.0, 600.0))],
            Vec2::ZERO,
        );
        assert_eq!(outcome.resized, Some(Vec2::new(1000.0, 600.0)));
        assert!(outcome.redraw);
        let camera = driver.camera().unwrap();
        assert_eq!(camera.resolution(), Vec2::new(1000.0, 600.0));
        assert!(camera.size_changed());
        assert!((camera.center() - Vec2::ZERO).length() < 1e-4);
    }

    #[test]
    fn test_world_widgets_hit_test_through_the_camera() {
        // The world origin sits at the screen center
        let mut driver = FrameDriver::new().with_camera(Camera::new(Vec2::new(800.0, 600.0)));
        driver.register("world", Placement::World, button());
        driver.register("screen", Placement::Screen, button());

        tick(&mut driver, vec![RawEvent::MouseDown(1)], Vec2::new(420.0, 320.0));
        assert!(driver.widget::<Button>("world").is_some_and(Button::is_pressed));
        assert!(!driver.widget::<Button>("screen").is_some_and(Button::is_pressed));

        let mut list = DrawList::new();
        driver.draw(&mut list);
        // Fill and border for each button
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_hidden_widgets_are_not_drawn() {
        let mut driver = FrameDriver::new();
        driver.register("ok", Placement::Screen, button());
        if let Some(button) = driver.widget_mut::<Button>("ok") {
            button.set_visible(false);
        }
        let mut list = DrawList::new();
        driver.draw(&mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_hidden_widgets_let_the_loop_idle() {
        let mut driver = FrameDriver::new();
        driver.register(
            "slider",
            Placement::Screen,
            Box::new(Slider::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 10.0), (0.0, 1.0), 0.1)),
        );
        driver.register(
            "pad",
            Placement::Screen,
            Box::new(CircularPad::new(
                Vec2::new(300.0, 300.0),
                40.0,
                color::SKY_BLUE,
                color::WHEAT,
            )),
        );
        driver.register(
            "form",
            Placement::Screen,
            Box::new(MultiBox::new(Vec2::new(400.0, 0.0), Vec2::new(80.0, 30.0), (2, 2))),
        );
        let away = Vec2::new(900.0, 900.0);
        tick(&mut driver, vec![], away);
        tick(&mut driver, vec![], away);

        if let Some(slider) = driver.widget_mut::<Slider>("slider") {
            slider.set_visible(false);
        }
        if let Some(pad) = driver.widget_mut::<CircularPad>("pad") {
            pad.set_visible(false);
        }
        if let Some(form) = driver.widget_mut::<MultiBox>("form") {
            form.set_visible(false);
        }

        let redraws: Vec<bool> = (0..5)
            .map(|_| tick(&mut driver, vec![], away).redraw)
            .collect();
        assert_eq!(redraws, [false; 5]);
        assert!(!driver.widget::<Slider>("slider").unwrap().changed());
        assert!(!driver.widget::<CircularPad>("pad").unwrap().changed());
        assert!(!driver.widget::<MultiBox>("form").unwrap().changed());

        // Hidden cells ignore typing
        tick(&mut driver, vec![RawEvent::TextInput("x".into())], away);
        assert_eq!(driver.widget::<MultiBox>("form").unwrap().text(0, 0), "");
    }

    #[test]
    fn test_same_size_resize_keeps_zoom_flags() {
        let mut driver = FrameDriver::new().with_camera(Camera::new(Vec2::new(800.0, 600.0)));
        tick(&mut driver, vec![], Vec2::ZERO);
        let outcome = tick(
            &mut driver,
            vec![
                RawEvent::MouseWheel(1.0),
                RawEvent::Resized(Vec2::new(800.0, 600.0)),
            ],
            Vec2::new(400.0, 300.0),
        );
        assert!(outcome.redraw);
        let camera = driver.camera().unwrap();
        assert!(camera.size_changed());
        assert!(camera.changed());
        assert!(camera.scale() > 1.0);
    }
}
