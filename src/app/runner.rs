//! winit application handler driving a [`FrameDriver`]

use std::time::Instant;

use tracing::{debug, error, info};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::driver::FrameDriver;
use super::window::window_attributes_from_config;
use crate::draw::{DrawList, MonospaceMetrics};
use crate::input::InputCollector;

/// Per-frame callback run after the widgets updated
pub type FrameHook = Box<dyn FnMut(&mut FrameDriver)>;

/// Window plus frame loop
///
/// Frames are recorded into a [`DrawList`]; hooking up a real renderer
/// means replaying that list onto a GPU-backed [`crate::draw::Surface`].
pub struct App {
    config: AppConfig,
    window: Option<Window>,
    driver: FrameDriver,
    collector: InputCollector,
    metrics: MonospaceMetrics,
    frame: DrawList,
    hook: Option<FrameHook>,
    last_update: Option<Instant>,
    frames: u64,
}

impl App {
    pub fn new(config: AppConfig, driver: FrameDriver) -> Self {
        info!(profile = %config.profile, "Starting frame loop");
        info!(?config.window, "Window configuration");
        Self {
            config,
            window: None,
            driver,
            collector: InputCollector::new(),
            metrics: MonospaceMetrics,
            frame: DrawList::new(),
            hook: None,
            last_update: None,
            frames: 0,
        }
    }

    /// Builder method to run `hook` every frame
    pub fn with_hook(mut self, hook: impl FnMut(&mut FrameDriver) + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    /// Runs the event loop until the window closes
    pub fn run(mut self) -> crate::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        info!(frames = self.frames, "Frame loop finished");
        Ok(())
    }

    fn record_frame(&mut self) {
        self.frame.clear();
        self.driver.draw(&mut self.frame);
        debug!(
            frame = self.frames,
            commands = self.frame.len(),
            "Frame recorded"
        );
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        match event_loop.create_window(window_attributes_from_config(&self.config.window)) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );
                self.collector.set_scale_factor(window.scale_factor() as f32);
                self.window = Some(window);
                self.last_update = Some(Instant::now());
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(last_update) = self.last_update else {
            return;
        };
        let now = Instant::now();
        self.last_update = Some(now);

        let (events, pointer) = self.collector.take_frame();
        let outcome = self
            .driver
            .tick(events, pointer, now - last_update, &self.metrics);
        if !outcome.running {
            event_loop.exit();
            return;
        }

        if let Some(hook) = &mut self.hook {
            hook(&mut self.driver);
        }

        if outcome.redraw
            && let Some(window) = &self.window
        {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Close requests go through the collector as a quit event
        self.collector.handle_window_event(&event);

        if let WindowEvent::RedrawRequested = event {
            self.frames += 1;
            self.record_frame();
        }
    }
}
