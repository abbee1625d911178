use crate::core::actions::render::policy::RenderPolicy;
use crate::core::actions::render::worker_pool::{DEFAULT_TILE_SIZE, RenderSettings};
use crate::core::data::colour::Colour;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::colour_mapping::kinds::MandelbrotColourMapKinds;

pub const DEFAULT_MAX_ITERATIONS: u32 = 500;
pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;
pub const DEFAULT_TITLE: &str = "Mandelbrot Fractal";
pub const DEFAULT_CLEAR_COLOUR: Colour = Colour { r: 0, g: 0, b: 255 };

pub const DEFAULT_XMIN: f64 = -1.5;
pub const DEFAULT_XMAX: f64 = 0.5;
pub const DEFAULT_YMIN: f64 = -1.0;
pub const DEFAULT_YMAX: f64 = 1.0;

/// Everything needed to open a surface and start exploring.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotConfig {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub max_iterations: u32,
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub workers: usize,
    pub policy: RenderPolicy,
    pub tile_size: u32,
    pub colour_map_kind: MandelbrotColourMapKinds,
    pub clear_colour: Colour,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            xmin: DEFAULT_XMIN,
            xmax: DEFAULT_XMAX,
            ymin: DEFAULT_YMIN,
            ymax: DEFAULT_YMAX,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            title: DEFAULT_TITLE.to_owned(),
            workers: 1,
            policy: RenderPolicy::default(),
            tile_size: DEFAULT_TILE_SIZE,
            colour_map_kind: MandelbrotColourMapKinds::default(),
            clear_colour: DEFAULT_CLEAR_COLOUR,
        }
    }
}

impl MandelbrotConfig {
    pub fn viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(self.xmin, self.xmax, self.ymin, self.ymax, self.max_iterations)
    }

    #[must_use]
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            policy: self.policy,
            workers: self.workers,
            tile_size: self.tile_size,
        }
    }
}
