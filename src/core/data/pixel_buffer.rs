use crate::core::actions::render::ports::render_surface::RenderSurface;
use crate::core::data::colour::Colour;
use crate::core::data::point::Point;
use thiserror::Error;

const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("pixel buffer size must be positive: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    #[error("pixel at x:{}, y:{} outside of {}x{} buffer", .pixel.x, .pixel.y, .width, .height)]
    PixelOutsideBounds { pixel: Point, width: u32, height: u32 },
}

pub type PixelBufferData = Vec<u8>;

/// In-memory RGB surface, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    draw_colour: Colour,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, PixelBufferError> {
        if width == 0 || height == 0 {
            return Err(PixelBufferError::InvalidSize { width, height });
        }

        Ok(Self {
            width,
            height,
            draw_colour: Colour::BLACK,
            buffer: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    fn index(&self, pixel: Point) -> Option<usize> {
        if pixel.x >= self.width || pixel.y >= self.height {
            return None;
        }

        Some((pixel.y as usize * self.width as usize + pixel.x as usize) * BYTES_PER_PIXEL)
    }

    #[must_use]
    pub fn pixel(&self, pixel: Point) -> Option<Colour> {
        self.index(pixel).map(|i| Colour {
            r: self.buffer[i],
            g: self.buffer[i + 1],
            b: self.buffer[i + 2],
        })
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index(pixel).ok_or(PixelBufferError::PixelOutsideBounds {
            pixel,
            width: self.width,
            height: self.height,
        })?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }
}

impl RenderSurface for PixelBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_draw_colour(&mut self, colour: Colour) {
        self.draw_colour = colour;
    }

    // Out-of-range points are clipped, as a window surface would.
    fn draw_point(&mut self, point: Point) {
        let _ = self.set_pixel(point, self.draw_colour);
    }

    fn clear(&mut self, colour: Colour) {
        for pixel in self.buffer.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&[colour.r, colour.g, colour.b]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_zeroed_buffer() {
        let buffer = PixelBuffer::new(10, 10).unwrap();

        assert_eq!(buffer.buffer().len(), 300);
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_new_rejects_empty_surface() {
        assert_eq!(
            PixelBuffer::new(0, 10),
            Err(PixelBufferError::InvalidSize { width: 0, height: 10 })
        );
    }

    #[test]
    fn test_set_pixel_writes_rgb_triplet_row_major() {
        let mut buffer = PixelBuffer::new(2, 2).unwrap();
        buffer.set_pixel(Point { x: 1, y: 1 }, Colour::new(1, 2, 3)).unwrap();

        assert_eq!(buffer.buffer()[9..12], [1, 2, 3]);
        assert_eq!(buffer.pixel(Point { x: 1, y: 1 }), Some(Colour::new(1, 2, 3)));
        assert_eq!(buffer.pixel(Point { x: 0, y: 0 }), Some(Colour::BLACK));
    }

    #[test]
    fn test_set_pixel_outside_bounds_fails() {
        let mut buffer = PixelBuffer::new(4, 3).unwrap();
        let pixel = Point { x: 4, y: 0 };

        assert_eq!(
            buffer.set_pixel(pixel, Colour::BLACK),
            Err(PixelBufferError::PixelOutsideBounds { pixel, width: 4, height: 3 })
        );
        assert_eq!(buffer.pixel(pixel), None);
    }

    #[test]
    fn test_draw_point_uses_current_draw_colour() {
        let mut buffer = PixelBuffer::new(3, 3).unwrap();
        buffer.set_draw_colour(Colour::new(9, 8, 7));
        buffer.draw_point(Point { x: 2, y: 0 });
        buffer.draw_point(Point { x: 3, y: 3 });

        assert_eq!(buffer.pixel(Point { x: 2, y: 0 }), Some(Colour::new(9, 8, 7)));
        assert_eq!(buffer.size(), (3, 3));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut buffer = PixelBuffer::new(5, 4).unwrap();
        buffer.clear(Colour::new(0, 0, 255));

        assert!(buffer.buffer().chunks_exact(3).all(|p| p == [0, 0, 255]));
    }
}
