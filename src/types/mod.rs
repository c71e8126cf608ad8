//! Texel, buffer and flag types shared by every stage of the pipeline.

mod buffer;
mod flags;
mod texel;

pub use buffer::PixelBuffer;
pub use flags::{Channels, TextureFlags};
pub use texel::Texel;

pub(crate) use buffer::copy_rows;
