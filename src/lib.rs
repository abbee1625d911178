mod controllers;
mod core;
mod input;
mod presenters;

pub use controllers::ports::file_presenter::FilePresenterPort;
pub use controllers::session::{Command, Session, SessionError, SessionOutcome};
pub use crate::core::actions::navigate::{DETAIL_FACTOR, Navigation};
pub use crate::core::actions::render::policy::{ParseRenderPolicyError, RenderPolicy};
pub use crate::core::actions::render::ports::colour_map::ColourMap;
pub use crate::core::actions::render::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::render::ports::render_surface::RenderSurface;
pub use crate::core::actions::render::scheduler::{AtomicTaskQueue, TaskQueue, static_band, static_bands, tile_grid};
pub use crate::core::actions::render::worker_pool::{
    DEFAULT_TILE_SIZE, RenderError, RenderSettings, RenderStats, WorkerReport, render_pass,
};
pub use crate::core::data::colour::Colour;
pub use crate::core::data::complex::Complex;
pub use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
pub use crate::core::data::point::Point;
pub use crate::core::data::tile::{Tile, TileError};
pub use crate::core::data::viewport::{Axis, Viewport, ViewportError};
pub use crate::core::fractals::mandelbrot::algorithm::{MandelbrotAlgorithm, iterations_at};
pub use crate::core::fractals::mandelbrot::colour_mapping::factory::mandelbrot_colour_map_factory;
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;
pub use crate::core::fractals::mandelbrot::colour_mapping::maps::channel_multiplier::ChannelMultiplierMap;
pub use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
#[cfg(feature = "gui")]
pub use input::gui::run_gui;
pub use input::keys::{InputEvent, ScriptError, command_for, parse_script};
pub use presenters::file::ppm::PpmFilePresenter;
