//! Owned grids of RGBA texels.

use super::Texel;
use crate::error::{AtlasError, Result};
use std::fmt;

/// A `width` x `height` grid of texels, row-major, origin at the top-left.
///
/// The texel count always equals `width * height`; every constructor checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    texels: Vec<Texel>,
}

impl PixelBuffer {
    /// Create a buffer with every texel zeroed.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Texel::TRANSPARENT)
    }

    /// Create a buffer with every texel set to `texel`.
    pub fn filled(width: u32, height: u32, texel: Texel) -> Self {
        Self {
            width,
            height,
            texels: vec![texel; area(width, height)],
        }
    }

    /// Wrap existing texels.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Texel>) -> Result<Self> {
        let expected = area(width, height);
        if texels.len() != expected {
            return Err(AtlasError::SizeMismatch(format!(
                "{}x{} buffer needs {} texels, got {}",
                width,
                height,
                expected,
                texels.len()
            )));
        }

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Wrap texels already known to hold `width * height` entries.
    pub(crate) fn from_raw(width: u32, height: u32, texels: Vec<Texel>) -> Self {
        debug_assert_eq!(texels.len(), area(width, height));
        Self {
            width,
            height,
            texels,
        }
    }

    /// Build from tightly packed RGBA8 bytes (4 bytes per texel).
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let expected = area(width, height) * 4;
        if bytes.len() != expected {
            return Err(AtlasError::SizeMismatch(format!(
                "{}x{} buffer needs {} RGBA bytes, got {}",
                width,
                height,
                expected,
                bytes.len()
            )));
        }

        let texels = bytes
            .chunks_exact(4)
            .map(|px| Texel::new(px[0], px[1], px[2], px[3]))
            .collect();

        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Flatten into RGBA8 bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|t| t.to_array()).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of texels.
    pub fn len(&self) -> usize {
        self.texels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texels.is_empty()
    }

    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    pub fn texels_mut(&mut self) -> &mut [Texel] {
        &mut self.texels
    }

    pub fn into_texels(self) -> Vec<Texel> {
        self.texels
    }

    /// Linear index of `(x, y)`, or `None` outside the buffer.
    pub fn index_of(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn position_of(&self, index: usize) -> Option<(u32, u32)> {
        if index < self.texels.len() {
            let width = self.width as usize;
            Some(((index % width) as u32, (index / width) as u32))
        } else {
            None
        }
    }

    /// Get the texel at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<Texel> {
        self.index_of(x, y)
            .map(|index| self.texels[index])
            .ok_or_else(|| self.out_of_range(x, y))
    }

    /// Overwrite the texel at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, texel: Texel) -> Result<()> {
        let index = self.index_of(x, y).ok_or_else(|| self.out_of_range(x, y))?;
        self.texels[index] = texel;
        Ok(())
    }

    /// Check if any texel is not fully opaque.
    pub fn has_transparency(&self) -> bool {
        self.texels.iter().any(|t| t.a < 255)
    }

    /// Copy `source` into this buffer with its top-left corner at `(x, y)`.
    ///
    /// Rows are copied verbatim; nothing is blended.
    pub fn blit(&mut self, source: &PixelBuffer, x: u32, y: u32) -> Result<()> {
        let fits_x = x.checked_add(source.width).is_some_and(|right| right <= self.width);
        let fits_y = y.checked_add(source.height).is_some_and(|bottom| bottom <= self.height);
        if !fits_x || !fits_y {
            return Err(AtlasError::OutOfRange(format!(
                "{} source at ({}, {}) does not fit in {} buffer",
                source, x, y, self
            )));
        }

        let src_width = source.width as usize;
        let dst_width = self.width as usize;
        for (row, src_row) in source.texels.chunks_exact(src_width.max(1)).enumerate() {
            let start = (y as usize + row) * dst_width + x as usize;
            self.texels[start..start + src_width].copy_from_slice(src_row);
        }

        Ok(())
    }

    /// A copy of this buffer mirrored vertically.
    pub fn flipped_y(&self) -> PixelBuffer {
        let mut texels = vec![Texel::TRANSPARENT; self.texels.len()];
        copy_rows(&self.texels, &mut texels, self.width as usize, true);
        Self {
            width: self.width,
            height: self.height,
            texels,
        }
    }

    fn out_of_range(&self, x: u32, y: u32) -> AtlasError {
        AtlasError::OutOfRange(format!("({}, {}) is outside the {} buffer", x, y, self))
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Copy whole rows from `source` to `destination`, both `width` texels wide.
/// With `flip_y`, destination row `y` is taken from source row `height - 1 - y`.
pub(crate) fn copy_rows(source: &[Texel], destination: &mut [Texel], width: usize, flip_y: bool) {
    debug_assert_eq!(source.len(), destination.len());
    if !flip_y || width == 0 {
        destination.copy_from_slice(source);
        return;
    }

    for (dst_row, src_row) in destination
        .chunks_exact_mut(width)
        .zip(source.chunks_exact(width).rev())
    {
        dst_row.copy_from_slice(src_row);
    }
}

fn area(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
