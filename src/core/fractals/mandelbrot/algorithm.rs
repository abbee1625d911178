use crate::core::actions::render::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;

/// `|z|² ≥ 4` is the same test as `|z| ≥ 2` without the square root.
const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Escape-time count for `c = x + iy` under `z → z² + c`, `z₀ = 0`.
///
/// Returns the first `n` at which `|zₙ| ≥ 2`, or `max_iterations` when the
/// orbit stays bounded for the whole budget.
#[inline]
#[must_use]
pub fn iterations_at(x: f64, y: f64, max_iterations: u32) -> u32 {
    let c = Complex::new(x, y);
    let mut z = Complex::ZERO;
    let mut iterations = 0;

    while z.magnitude_squared() < ESCAPE_RADIUS_SQUARED && iterations < max_iterations {
        z = z.square() + c;
        iterations += 1;
    }

    iterations
}

/// Per-pass pixel kernel: a viewport snapshot bound to a surface resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    viewport: Viewport,
    width: u32,
    height: u32,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(viewport: Viewport, width: u32, height: u32) -> Self {
        Self { viewport, width, height }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.viewport.max_iterations()
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Success = u32;

    fn compute(&self, pixel: Point) -> u32 {
        let c = self.viewport.pixel_to_coordinate(pixel, self.width, self.height);

        iterations_at(c.real, c.imag, self.viewport.max_iterations())
    }
}
