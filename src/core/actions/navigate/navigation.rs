use crate::core::data::viewport::{Viewport, ViewportError};

/// `IncreaseDetail` multiplies the iteration budget by this.
pub const DETAIL_FACTOR: u32 = 5;

/// A viewport transform requested by the user.
///
/// Transforms are pure: [`Navigation::apply`] takes the current viewport and
/// returns the next one, which the caller installs before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    /// Centre on a clicked pixel of a `width` x `height` surface.
    Recenter { x: u32, y: u32, width: u32, height: u32 },
    IncreaseDetail,
}

impl Navigation {
    pub fn apply(self, viewport: &Viewport) -> Result<Viewport, ViewportError> {
        let (xmin, xmax, ymin, ymax) = (viewport.xmin(), viewport.xmax(), viewport.ymin(), viewport.ymax());
        let x_step = viewport.x_range() / 4.0;
        let y_step = viewport.y_range() / 4.0;

        match self {
            Self::PanUp => viewport.with_bounds(xmin, xmax, ymin - y_step, ymax - y_step),
            Self::PanDown => viewport.with_bounds(xmin, xmax, ymin + y_step, ymax + y_step),
            Self::PanLeft => viewport.with_bounds(xmin - x_step, xmax - x_step, ymin, ymax),
            Self::PanRight => viewport.with_bounds(xmin + x_step, xmax + x_step, ymin, ymax),
            Self::ZoomIn => viewport.with_bounds(xmin + x_step, xmax - x_step, ymin + y_step, ymax - y_step),
            // Grows by half the range per side so that it undoes one ZoomIn exactly.
            Self::ZoomOut => viewport.with_bounds(
                xmin - 2.0 * x_step,
                xmax + 2.0 * x_step,
                ymin - 2.0 * y_step,
                ymax + 2.0 * y_step,
            ),
            Self::Recenter { x, y, width, height } => {
                let x_range = viewport.x_range();
                let y_range = viewport.y_range();
                let x_center = xmin + x_range * f64::from(x) / f64::from(width);
                let y_center = ymin + y_range * f64::from(y) / f64::from(height);

                // center ± full range: the visible window doubles on every recenter
                viewport.with_bounds(
                    x_center - x_range,
                    x_center + x_range,
                    y_center - y_range,
                    y_center + y_range,
                )
            }
            Self::IncreaseDetail => {
                viewport.with_max_iterations(viewport.max_iterations().saturating_mul(DETAIL_FACTOR))
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PanUp => "pan up",
            Self::PanDown => "pan down",
            Self::PanLeft => "pan left",
            Self::PanRight => "pan right",
            Self::ZoomIn => "zoom in",
            Self::ZoomOut => "zoom out",
            Self::Recenter { .. } => "recenter",
            Self::IncreaseDetail => "increase detail",
        }
    }
}
