//! Texture atlas building.
//!
//! This module packs named sprites into a single buffer, records each
//! sprite's normalized region and optionally bleeds sprite edges into the
//! surrounding gutter.

mod bleed;
mod builder;
mod sprite;

pub use bleed::{bleed_edges, SpriteRect};
pub use builder::{build_atlas, AtlasBuilder, AtlasConfig, AtlasRegion, NamedRegion, TextureAtlas};
pub use sprite::InputSprite;
