//! Main GUI application loop.

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use tracing::{error, info, warn};
use winit::{
    dpi::{LogicalSize, PhysicalPosition},
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::EventLoop,
    keyboard::Key,
    window::{Window, WindowBuilder},
};

use crate::controllers::session::{Session, SessionError, SessionOutcome};
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
use crate::input::gui::frame::copy_rgb_into_rgba;
use crate::input::keys::{InputEvent, command_for};

#[derive(Debug, Error)]
pub enum GuiError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("framebuffer error: {0}")]
    Pixels(#[from] pixels::Error),
    #[error(transparent)]
    Surface(#[from] PixelBufferError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

struct App {
    pixels: Pixels<'static>,
    session: Session<PixelBuffer>,
    /// Last cursor position in surface pixels, if inside the surface.
    cursor: Option<(u32, u32)>,
}

impl App {
    fn new(window: &'static Window, session: Session<PixelBuffer>) -> Result<Self, GuiError> {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);
        let (width, height) = (session.surface().width(), session.surface().height());
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self {
            pixels,
            session,
            cursor: None,
        })
    }

    fn track_cursor(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = self
            .pixels
            .window_pos_to_pixel((position.x as f32, position.y as f32))
            .ok()
            .map(|(x, y)| (x as u32, y as u32));
    }

    /// Returns `Ok(true)` when the session asked to quit.
    fn handle_input(&mut self, event: InputEvent) -> Result<bool, SessionError> {
        let Some(command) = command_for(event) else {
            return Ok(false);
        };

        match self.session.handle(command) {
            Ok(SessionOutcome::Quit) => Ok(true),
            Ok(SessionOutcome::Rendered(stats)) => {
                info!(tiles = stats.tiles, elapsed = ?stats.elapsed, "frame rendered");
                Ok(false)
            }
            Ok(SessionOutcome::Updated) => Ok(false),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                warn!(%err, "command ignored");
                Ok(false)
            }
        }
    }

    fn render(&mut self) -> Result<(), pixels::Error> {
        copy_rgb_into_rgba(self.session.surface().buffer(), self.pixels.frame_mut());
        self.pixels.render()
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        if width > 0 && height > 0 {
            self.pixels.resize_surface(width, height)?;
        }

        Ok(())
    }
}

fn mouse_button_number(button: MouseButton) -> Option<u8> {
    match button {
        MouseButton::Left => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Right => Some(3),
        _ => None,
    }
}

/// Opens the window, draws the first frame and runs until quit or close.
pub fn run_gui(config: &MandelbrotConfig) -> Result<(), GuiError> {
    let event_loop = EventLoop::new()?;

    // Leak the window to get a 'static reference for pixels
    let window: &'static Window = Box::leak(Box::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64))
            .build(&event_loop)?,
    ));

    let mut session = Session::new(config, PixelBuffer::new(config.width, config.height)?)?;
    session.start()?;

    let mut app = App::new(window, session)?;
    let mut failure: Option<GuiError> = None;

    event_loop.run(|event, elwt| {
        let Event::WindowEvent { event, window_id } = event else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        let input = match event {
            WindowEvent::CloseRequested => {
                elwt.exit();
                None
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = app.render() {
                    error!(%err, "failed to present frame");
                    failure = Some(err.into());
                    elwt.exit();
                }
                None
            }
            WindowEvent::Resized(size) => {
                if let Err(err) = app.resize(size.width, size.height) {
                    warn!(%err, "failed to resize surface");
                }
                window.request_redraw();
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                app.track_cursor(position);
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => mouse_button_number(button)
                .zip(app.cursor)
                .map(|(button, (x, y))| InputEvent::Button { button, x, y }),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(text),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => text.chars().next().map(InputEvent::Key),
            _ => None,
        };

        let Some(input) = input else {
            return;
        };

        match app.handle_input(input) {
            Ok(true) => elwt.exit(),
            Ok(false) => window.request_redraw(),
            Err(err) => {
                error!(%err, "render failed");
                failure = Some(err.into());
                elwt.exit();
            }
        }
    })?;

    failure.map_or(Ok(()), Err)
}
