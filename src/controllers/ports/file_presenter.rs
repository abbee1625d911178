use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Encodes a finished frame into some image format.
pub trait FilePresenterPort {
    fn write_frame<W: Write>(&self, buffer: &PixelBuffer, writer: W) -> io::Result<()>;

    /// Writes the frame to `filepath`, creating missing parent directories.
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> io::Result<()> {
        let filepath = filepath.as_ref();

        if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(filepath)?);
        self.write_frame(buffer, &mut writer)?;
        writer.flush()?;

        info!(path = %filepath.display(), width = buffer.width(), height = buffer.height(), "wrote frame");

        Ok(())
    }
}
