//! # Sprite Atlas
//!
//! A Rust library for packing sprites into texture atlases.
//!
//! ## Overview
//!
//! This library takes named RGBA sprites as input and produces a single
//! atlas buffer plus a normalized UV region for every sprite. Optional edge
//! bleeding fills the gutter around each sprite to avoid filtering seams.
//! It also samples buffers bilinearly and assembles six faces into a cubemap.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sprite_atlas::{build_atlas, load_sprites, save_png};
//!
//! // Load every PNG in a directory (or ZIP)
//! let sprites = load_sprites("path/to/sprites")?;
//!
//! // Pack with a 2-texel gutter, V flipped, edges bled
//! let atlas = build_atlas(sprites, 2, true, true)?;
//!
//! // Look up a sprite's region
//! let region = atlas.sprite("ui/button")?.region;
//!
//! // Write the atlas and its manifest
//! save_png(atlas.pixels(), "atlas.png")?;
//! atlas.manifest().save("atlas.json")?;
//! ```
//!
//! ## Packing Only
//!
//! The packer works on plain sizes, independent of pixel data:
//!
//! ```ignore
//! use sprite_atlas::pack;
//!
//! let result = pack(&[(32, 32), (16, 8)], 1)?;
//! println!("{}x{}", result.canvas.0, result.canvas.1);
//! ```

pub mod atlas;
pub mod cubemap;
pub mod error;
pub mod export;
pub mod loader;
pub mod packer;
pub mod sampler;
pub mod types;

// Re-export main types for convenience
pub use atlas::{
    bleed_edges, build_atlas, AtlasBuilder, AtlasConfig, AtlasRegion, InputSprite, NamedRegion,
    SpriteRect, TextureAtlas,
};
pub use cubemap::{assemble_cubemap, CubeFace, Cubemap, CubemapFaces};
pub use error::{AtlasError, Result};
pub use export::{save_png, to_png, AtlasManifest};
pub use packer::{pack, PackResult, PackedPlacement, RectanglePacker};
pub use sampler::{evaluate, sample_nearest};
pub use types::{Channels, PixelBuffer, Texel, TextureFlags};

/// Load sprites from a file path (ZIP or directory).
pub fn load_sprites<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<InputSprite>> {
    loader::load_sprites_from_path(path)
}

/// Load sprites from ZIP bytes.
pub fn load_sprites_from_bytes(data: &[u8]) -> Result<Vec<InputSprite>> {
    loader::load_sprites_from_bytes(data)
}
