use std::io::{self, Write};

use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes frames as binary PPM (P6).
#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn write_frame<W: Write>(&self, buffer: &PixelBuffer, mut writer: W) -> io::Result<()> {
        // P6: binary RGB, then width, height and max channel value
        writeln!(writer, "P6")?;
        writeln!(writer, "{} {}", buffer.width(), buffer.height())?;
        writeln!(writer, "255")?;
        writer.write_all(buffer.buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::render::ports::render_surface::RenderSurface;
    use crate::core::data::colour::Colour;

    fn blue_frame() -> PixelBuffer {
        let mut buffer = PixelBuffer::new(2, 1).unwrap();
        buffer.clear(Colour::new(0, 0, 255));
        buffer
    }

    fn expected_bytes() -> Vec<u8> {
        let mut expected = b"P6\n2 1\n255\n".to_vec();
        expected.extend_from_slice(&[0, 0, 255, 0, 0, 255]);
        expected
    }

    #[test]
    fn test_header_then_raw_rgb() {
        let mut out = Vec::new();
        PpmFilePresenter::new().write_frame(&blue_frame(), &mut out).unwrap();

        assert_eq!(out, expected_bytes());
    }

    #[test]
    fn test_present_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("mandelbrot-ppm-{}", std::process::id()));
        let path = dir.join("frames").join("frame.ppm");

        PpmFilePresenter::new().present(&blue_frame(), &path).unwrap();
        let written = std::fs::read(&path).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(written, expected_bytes());
    }
}
