use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::debug::Debug;
use crate::debug_log;
use crate::engine::Engine;
use crate::input::{keycode_to_str, mousebutton_to_str};
use crate::services::InputService;

/// Window host for an [`Engine`]: owns the event loop callbacks, feeds
/// input and paces frames.
pub struct App {
    engine: Engine,
    window: Option<Arc<Window>>,
    last_frame: Instant,
    height: u32,
    debugger: Debug,
    error: Option<anyhow::Error>,
}

impl App {
    pub fn new(engine: Engine) -> Self {
        let debugger = Debug::new(engine.config().debug_enabled);
        let height = engine.config().height;
        Self {
            engine,
            window: None,
            last_frame: Instant::now(),
            height,
            debugger,
            error: None,
        }
    }

    /// Runs until the window closes. A level that fails to load ends the
    /// loop and is reported here.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self)?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        error!("{e:#}");
        self.error = Some(e);
        event_loop.exit();
    }

    fn tick(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if let Some(target) = self.engine.target_frame_time() {
            let next = self.last_frame + target;
            if now < next {
                event_loop.set_control_flow(ControlFlow::WaitUntil(next));
                return;
            }
        }

        let elapsed = now - self.last_frame;
        self.last_frame = now;
        if let Err(e) = self.engine.frame(elapsed) {
            self.fail(event_loop, e);
            return;
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }

    fn log_click(&mut self, button: winit::event::MouseButton) {
        let Some(name) = mousebutton_to_str(button) else {
            return;
        };
        let pixel = self.engine.input().mouse_position();
        let Some(camera) = self.engine.level().and_then(|l| l.cameras().first()) else {
            return;
        };
        let world = camera.screen_to_world(pixel, self.height as f32);
        debug_log!(self.debugger, "{name} at world ({:.2}, {:.2})", world.x, world.y);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.engine.config();
        let attributes = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height));
        let first_level = config.first_level.clone();

        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        }

        info!("starting at {first_level}");
        if let Err(e) = self.engine.start(&first_level) {
            self.fail(event_loop, e);
            return;
        }
        self.last_frame = Instant::now();
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            self.tick(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.engine.shutdown();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.height = size.height,
            WindowEvent::Focused(false) => self.engine.input_mut().release_all(),
            WindowEvent::CursorMoved { position, .. } => {
                self.engine
                    .input_mut()
                    .cursor_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.engine
                    .input_mut()
                    .button_event(button, state.is_pressed());
                if state.is_pressed() {
                    self.log_click(button);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape && state.is_pressed() {
                    event_loop.exit();
                }
                if let Some(name) = keycode_to_str(code) {
                    debug_log!(self.debugger, "key {name} pressed={}", state.is_pressed());
                }
                self.engine.input_mut().key_event(code, state.is_pressed());
            }
            _ => {}
        }
    }
}
