use crate::core::data::colour::Colour;
use crate::core::data::point::Point;

/// The drawing surface a render pass writes into.
///
/// Implementations are not required to be thread-safe: the worker pool
/// serializes every `set_draw_colour` + `draw_point` pair behind one mutex.
pub trait RenderSurface {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    fn set_draw_colour(&mut self, colour: Colour);

    fn draw_point(&mut self, point: Point);

    fn clear(&mut self, colour: Colour);
}
