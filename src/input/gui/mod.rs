//! Interactive window: winit for events, pixels for the framebuffer.

mod app;
mod frame;

pub use app::{GuiError, run_gui};
