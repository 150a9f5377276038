//! Application shell and main frame loop

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::core::{SimStats, Time};
use crate::input::Input;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: String::from("Tumble"),
            width: 1280,
            height: 720,
        }
    }
}

impl AppConfig {
    /// Set the window title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set window dimensions
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Demo trait that users implement
///
/// The application shell owns the frame loop: `update` is invoked exactly
/// once per frame and the next frame is scheduled only after it returns, so
/// a demo never overlaps with itself and never schedules its own
/// continuation.
pub trait Demo: 'static {
    /// Called once when the application starts
    fn init(&mut self, ctx: &mut AppContext);

    /// Called every frame
    fn update(&mut self, ctx: &mut AppContext);

    /// Called when the window is resized
    fn on_resize(&mut self, _ctx: &mut AppContext, _width: u32, _height: u32) {}

    /// Called when the application is shutting down
    fn shutdown(&mut self, _ctx: &mut AppContext) {}
}

/// Context passed to demo callbacks
pub struct AppContext {
    /// Time tracking
    pub time: Time,
    /// Input state
    pub input: Input,
    /// Frame and simulation statistics
    pub stats: SimStats,
    /// Window size
    window_size: PhysicalSize<u32>,
    /// Should the application quit
    should_quit: bool,
}

impl AppContext {
    fn new(width: u32, height: u32) -> Self {
        Self {
            time: Time::new(),
            input: Input::new(),
            stats: SimStats::new(),
            window_size: PhysicalSize::new(width, height),
            should_quit: false,
        }
    }

    /// Get window width
    pub fn width(&self) -> u32 {
        self.window_size.width
    }

    /// Get window height
    pub fn height(&self) -> u32 {
        self.window_size.height
    }

    /// Get aspect ratio
    pub fn aspect_ratio(&self) -> f32 {
        self.window_size.width as f32 / self.window_size.height.max(1) as f32
    }

    /// Request application shutdown
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Main application struct
pub struct App<D: Demo> {
    config: AppConfig,
    demo: D,
    context: AppContext,
    window: Option<Window>,
    initialized: bool,
}

impl<D: Demo> App<D> {
    /// Create a new application with the given demo
    pub fn new(config: AppConfig, demo: D) -> Self {
        let context = AppContext::new(config.width, config.height);
        Self {
            config,
            demo,
            context,
            window: None,
            initialized: false,
        }
    }

    /// Run the application
    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        env_logger::init();
        log::info!("Starting application: {}", self.config.title);

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;

        Ok(())
    }
}

impl<D: Demo> ApplicationHandler for App<D> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));

        let window = event_loop
            .create_window(window_attrs)
            .expect("Failed to create window");

        self.window = Some(window);

        if !self.initialized {
            self.demo.init(&mut self.context);
            self.initialized = true;
            log::info!("Application initialized successfully");
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down");
                self.demo.shutdown(&mut self.context);
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    self.context.window_size = new_size;
                    self.demo
                        .on_resize(&mut self.context, new_size.width, new_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key_code) = event.physical_key {
                    self.context.input.process_keyboard(key_code, event.state);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(x, y) => glam::Vec2::new(x, y),
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        glam::Vec2::new(pos.x as f32, pos.y as f32)
                    }
                };
                self.context.input.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                // Update time
                self.context.time.update();
                self.context.stats.record_frame(self.context.time.delta());

                // Run one demo frame
                self.demo.update(&mut self.context);

                // Check if should quit
                if self.context.should_quit() {
                    self.demo.shutdown(&mut self.context);
                    event_loop.exit();
                    return;
                }

                // Clear per-frame input state
                self.context.input.update();

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
