//! PNG encoding for pixel buffers.

use crate::atlas::TextureAtlas;
use crate::error::Result;
use crate::types::PixelBuffer;
use image::ImageEncoder;
use std::path::Path;

/// Encode a buffer as RGBA8 PNG bytes.
pub fn to_png(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let cursor = std::io::Cursor::new(&mut bytes);
    let encoder = image::codecs::png::PngEncoder::new(cursor);

    encoder.write_image(
        &buffer.to_rgba8(),
        buffer.width(),
        buffer.height(),
        image::ExtendedColorType::Rgba8,
    )?;

    Ok(bytes)
}

/// Encode a buffer and write it to `path`.
pub fn save_png<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> Result<()> {
    std::fs::write(path, to_png(buffer)?)?;
    Ok(())
}

impl TextureAtlas {
    /// Encode the atlas pixels as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        to_png(self.pixels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Texel;

    #[test]
    fn test_png_decodes_back() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.set(0, 0, Texel::new(255, 0, 0, 255)).unwrap();
        buffer.set(2, 1, Texel::new(1, 2, 3, 4)).unwrap();

        let bytes = to_png(&buffer).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.as_raw(), &buffer.to_rgba8());
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atlas.png");
        save_png(&PixelBuffer::filled(4, 4, Texel::WHITE), &path).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
    }
}
