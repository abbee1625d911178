use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    Real,
    Imaginary,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Real => f.write_str("x"),
            Self::Imaginary => f.write_str("y"),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport {axis} bounds are degenerate: min {min} must be below max {max}")]
    Degenerate { axis: Axis, min: f64, max: f64 },
    #[error("viewport bounds must be finite")]
    NonFinite,
    #[error("maximum iterations must be greater than zero")]
    ZeroMaxIterations,
}

/// The rectangle of the complex plane mapped onto the surface, plus the
/// iteration budget used when rendering it.
///
/// Always satisfies `xmin < xmax`, `ymin < ymax` and `max_iterations > 0`;
/// every constructor goes through [`Viewport::new`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
    max_iterations: u32,
}

impl Viewport {
    pub fn new(
        xmin: f64,
        xmax: f64,
        ymin: f64,
        ymax: f64,
        max_iterations: u32,
    ) -> Result<Self, ViewportError> {
        if ![xmin, xmax, ymin, ymax].iter().all(|v| v.is_finite()) {
            return Err(ViewportError::NonFinite);
        }

        if xmin >= xmax {
            return Err(ViewportError::Degenerate { axis: Axis::Real, min: xmin, max: xmax });
        }

        if ymin >= ymax {
            return Err(ViewportError::Degenerate { axis: Axis::Imaginary, min: ymin, max: ymax });
        }

        if max_iterations == 0 {
            return Err(ViewportError::ZeroMaxIterations);
        }

        Ok(Self { xmin, xmax, ymin, ymax, max_iterations })
    }

    #[must_use]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[must_use]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[must_use]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[must_use]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn x_range(&self) -> f64 {
        self.xmax - self.xmin
    }

    #[must_use]
    pub fn y_range(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Same iteration budget, new bounds.
    pub fn with_bounds(&self, xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self, ViewportError> {
        Self::new(xmin, xmax, ymin, ymax, self.max_iterations)
    }

    pub fn with_max_iterations(&self, max_iterations: u32) -> Result<Self, ViewportError> {
        Self::new(self.xmin, self.xmax, self.ymin, self.ymax, max_iterations)
    }

    /// Maps a pixel to the complex plane by plain linear interpolation.
    ///
    /// The two axes are scaled independently, so a non-square surface
    /// stretches the image. Pixels outside the surface extrapolate.
    #[must_use]
    pub fn pixel_to_coordinate(&self, pixel: Point, width: u32, height: u32) -> Complex {
        let real = self.xmin + f64::from(pixel.x) * self.x_range() / f64::from(width);
        let imag = self.ymin + f64::from(pixel.y) * self.y_range() / f64::from(height);

        Complex { real, imag }
    }
}
