//! Named input sprites.

use crate::error::{AtlasError, Result};
use crate::types::{Channels, PixelBuffer, Texel};
use std::fmt;

/// A named image waiting to be packed into an atlas.
///
/// Building an atlas consumes its sprites; their buffers are released once
/// copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSprite {
    name: String,
    pixels: PixelBuffer,
}

impl InputSprite {
    /// Longest accepted name, in bytes.
    pub const MAX_NAME_LEN: usize = 256;

    /// Create a sprite from an existing buffer.
    pub fn new(name: impl Into<String>, pixels: PixelBuffer) -> Result<Self> {
        let name = name.into();
        if name.len() > Self::MAX_NAME_LEN {
            return Err(AtlasError::InvalidInput(format!(
                "sprite name is {} bytes, limit is {}",
                name.len(),
                Self::MAX_NAME_LEN
            )));
        }
        if !name.is_ascii() {
            return Err(AtlasError::InvalidInput(format!(
                "sprite name `{}` is not ASCII",
                name
            )));
        }

        Ok(Self { name, pixels })
    }

    /// A sprite with every texel zeroed.
    pub fn blank(name: impl Into<String>, width: u32, height: u32) -> Result<Self> {
        Self::new(name, PixelBuffer::new(width, height))
    }

    /// A sprite filled with a single color.
    pub fn solid(name: impl Into<String>, width: u32, height: u32, texel: Texel) -> Result<Self> {
        Self::new(name, PixelBuffer::filled(width, height, texel))
    }

    /// A sprite built from one byte per texel, written into each channel in
    /// `channels`. Channels outside the mask stay zero.
    pub fn from_channel_data(
        name: impl Into<String>,
        width: u32,
        height: u32,
        data: &[u8],
        channels: Channels,
    ) -> Result<Self> {
        let texels = data
            .iter()
            .map(|&d| {
                let pick = |channel: Channels| if channels.contains(channel) { d } else { 0 };
                Texel::new(
                    pick(Channels::RED),
                    pick(Channels::GREEN),
                    pick(Channels::BLUE),
                    pick(Channels::ALPHA),
                )
            })
            .collect();

        Self::new(name, PixelBuffer::from_texels(width, height, texels)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelBuffer {
        &mut self.pixels
    }

    pub fn into_parts(self) -> (String, PixelBuffer) {
        (self.name, self.pixels)
    }
}

impl fmt::Display for InputSprite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
