//! Texture atlas builder using guillotine packing.

use super::bleed::{bleed_edges, SpriteRect};
use super::sprite::InputSprite;
use crate::error::{AtlasError, Result};
use crate::packer::RectanglePacker;
use crate::types::{PixelBuffer, TextureFlags};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A region within the texture atlas.
///
/// When the atlas was built with [`TextureFlags::FLIP_Y`] the vertical
/// bounds are swapped, so `v_min > v_max` and [`height`](Self::height) is
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtlasRegion {
    /// U coordinate of the left edge (0-1).
    pub u_min: f32,
    /// V coordinate of the top edge (0-1), or the bottom edge when flipped.
    pub v_min: f32,
    /// U coordinate of the right edge (0-1).
    pub u_max: f32,
    /// V coordinate of the bottom edge (0-1), or the top edge when flipped.
    pub v_max: f32,
}

impl AtlasRegion {
    /// Normalize a texel rectangle against the canvas size.
    pub fn from_rect(rect: SpriteRect, canvas_width: u32, canvas_height: u32) -> Self {
        let u_min = rect.x as f32 / canvas_width as f32;
        let v_min = rect.y as f32 / canvas_height as f32;
        Self {
            u_min,
            v_min,
            u_max: u_min + rect.width as f32 / canvas_width as f32,
            v_max: v_min + rect.height as f32 / canvas_height as f32,
        }
    }

    /// The same region with its vertical direction reversed.
    pub fn flipped_y(self) -> Self {
        Self {
            v_min: self.v_max,
            v_max: self.v_min,
            ..self
        }
    }

    pub fn is_flipped(&self) -> bool {
        self.v_min > self.v_max
    }

    /// Get the width of this region in UV space.
    pub fn width(&self) -> f32 {
        self.u_max - self.u_min
    }

    /// Get the height of this region in UV space.
    pub fn height(&self) -> f32 {
        self.v_max - self.v_min
    }

    /// Transform a local UV coordinate (0-1) to atlas coordinate.
    pub fn transform_uv(&self, u: f32, v: f32) -> [f32; 2] {
        [
            self.u_min + u * self.width(),
            self.v_min + v * self.height(),
        ]
    }
}

/// A sprite's name and where it landed in the atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRegion {
    pub name: String,
    pub region: AtlasRegion,
}

impl fmt::Display for NamedRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{},{},{},{}]",
            self.name, self.region.u_min, self.region.v_min, self.region.u_max, self.region.v_max
        )
    }
}

/// Atlas layout options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Gutter, in texels, kept around every sprite.
    pub padding: u32,
    /// Region flip and edge bleed switches.
    pub flags: TextureFlags,
}

impl AtlasConfig {
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_flip_y(mut self, flip: bool) -> Self {
        self.flags.set(TextureFlags::FLIP_Y, flip);
        self
    }

    pub fn with_bleed(mut self, bleed: bool) -> Self {
        self.flags.set(TextureFlags::BLEED_PIXELS, bleed);
        self
    }

    pub fn flip_y(&self) -> bool {
        self.flags.contains(TextureFlags::FLIP_Y)
    }

    pub fn bleed(&self) -> bool {
        self.flags.contains(TextureFlags::BLEED_PIXELS)
    }
}

/// A built texture atlas.
#[derive(Debug, Clone)]
pub struct TextureAtlas {
    pixels: PixelBuffer,
    sprites: Vec<NamedRegion>,
    rects: Vec<SpriteRect>,
    config: AtlasConfig,
}

impl TextureAtlas {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn config(&self) -> AtlasConfig {
        self.config
    }

    /// Regions in the order the sprites were added.
    pub fn sprites(&self) -> &[NamedRegion] {
        &self.sprites
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// First region named `name`.
    pub fn try_sprite(&self, name: &str) -> Option<&NamedRegion> {
        self.sprites.iter().find(|s| s.name == name)
    }

    /// Check if the atlas contains a sprite.
    pub fn contains(&self, name: &str) -> bool {
        self.try_sprite(name).is_some()
    }

    /// First region named `name`.
    pub fn sprite(&self, name: &str) -> Result<&NamedRegion> {
        self.try_sprite(name).ok_or_else(|| {
            AtlasError::NotFound(format!("sprite `{}` not found in {} atlas", name, self.pixels))
        })
    }

    /// Region at `index`, in input order.
    pub fn sprite_at(&self, index: usize) -> Result<&NamedRegion> {
        self.sprites.get(index).ok_or_else(|| {
            AtlasError::OutOfRange(format!(
                "sprite index {} out of range ({} sprites)",
                index,
                self.sprites.len()
            ))
        })
    }

    /// Texel rectangle of the sprite at `index`.
    pub fn sprite_rect(&self, index: usize) -> Result<SpriteRect> {
        self.sprite_at(index)?;
        Ok(self.rects[index])
    }

    /// Copy the first sprite named `name` back out of the atlas.
    pub fn extract_sprite(&self, name: &str) -> Result<PixelBuffer> {
        let index = self
            .sprites
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| AtlasError::NotFound(format!("sprite `{}` not found", name)))?;

        let rect = self.rects[index];
        let width = self.pixels.width() as usize;
        let mut texels = Vec::with_capacity(rect.width as usize * rect.height as usize);
        for row in rect.y..rect.y + rect.height {
            let start = row as usize * width + rect.x as usize;
            texels.extend_from_slice(&self.pixels.texels()[start..start + rect.width as usize]);
        }
        PixelBuffer::from_texels(rect.width, rect.height, texels)
    }

    /// Split into the atlas buffer and its regions.
    pub fn into_parts(self) -> (PixelBuffer, Vec<NamedRegion>) {
        (self.pixels, self.sprites)
    }
}

impl fmt::Display for TextureAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} atlas with {} sprites", self.pixels, self.sprites.len())
    }
}

/// Builder for creating texture atlases.
#[derive(Debug, Default)]
pub struct AtlasBuilder {
    config: AtlasConfig,
    sprites: Vec<InputSprite>,
}

impl AtlasBuilder {
    /// Create a new atlas builder.
    pub fn new(config: AtlasConfig) -> Self {
        Self {
            config,
            sprites: Vec::new(),
        }
    }

    /// Add a sprite to the atlas. Sprites keep the order they are added in.
    pub fn add_sprite(&mut self, sprite: InputSprite) {
        self.sprites.push(sprite);
    }

    pub fn with_sprites(mut self, sprites: impl IntoIterator<Item = InputSprite>) -> Self {
        self.sprites.extend(sprites);
        self
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    /// Pack, blit and (optionally) bleed every sprite into a new atlas.
    pub fn build(self) -> Result<TextureAtlas> {
        let config = self.config;
        let sizes: Vec<(u32, u32)> = self
            .sprites
            .iter()
            .map(|s| (s.width(), s.height()))
            .collect();

        let packed = RectanglePacker::new(config.padding).pack(&sizes)?;
        let (canvas_width, canvas_height) = packed.canvas;
        let mut pixels = PixelBuffer::new(canvas_width, canvas_height);

        let mut sprites = Vec::with_capacity(self.sprites.len());
        let mut rects = Vec::with_capacity(self.sprites.len());
        for (sprite, placement) in self.sprites.into_iter().zip(&packed.positions) {
            pixels.blit(sprite.pixels(), placement.x, placement.y)?;

            let rect = SpriteRect::new(placement.x, placement.y, sprite.width(), sprite.height());
            let mut region = AtlasRegion::from_rect(rect, canvas_width, canvas_height);
            if config.flip_y() {
                region = region.flipped_y();
            }

            let (name, _) = sprite.into_parts();
            sprites.push(NamedRegion { name, region });
            rects.push(rect);
        }

        if config.bleed() && config.padding > 0 {
            bleed_edges(&mut pixels, &rects, config.padding)?;
        }

        debug!(
            "built {}x{} atlas from {} sprites (padding {}, flags {:?})",
            canvas_width,
            canvas_height,
            sprites.len(),
            config.padding,
            config.flags
        );

        Ok(TextureAtlas {
            pixels,
            sprites,
            rects,
            config,
        })
    }
}

/// Build an atlas from `sprites` in one call.
pub fn build_atlas(
    sprites: Vec<InputSprite>,
    padding: u32,
    flip_y: bool,
    bleed: bool,
) -> Result<TextureAtlas> {
    let config = AtlasConfig::default()
        .with_padding(padding)
        .with_flip_y(flip_y)
        .with_bleed(bleed);
    AtlasBuilder::new(config).with_sprites(sprites).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Texel;

    fn solid(name: &str, size: u32, color: [u8; 4]) -> InputSprite {
        InputSprite::solid(name, size, size, Texel::from(color)).unwrap()
    }

    /// A sprite whose texels all differ, so misplaced copies show up.
    fn patterned(name: &str, width: u32, height: u32, seed: u8) -> InputSprite {
        let texels = (0..width * height)
            .map(|i| Texel::new(seed, (i % 251) as u8, (i / width) as u8, 255))
            .collect();
        InputSprite::new(name, PixelBuffer::from_texels(width, height, texels).unwrap()).unwrap()
    }

    fn rgby(size: u32) -> Vec<InputSprite> {
        vec![
            solid("r", size, [255, 0, 0, 0]),
            solid("g", size, [0, 255, 0, 0]),
            solid("b", size, [0, 0, 255, 0]),
            solid("y", size, [255, 255, 0, 0]),
        ]
    }

    #[test]
    fn test_empty_atlas_is_rejected() {
        let result = AtlasBuilder::new(AtlasConfig::default()).build();
        assert!(matches!(result, Err(AtlasError::InvalidInput(_))));
    }

    #[test]
    fn test_four_sprite_atlas() {
        let atlas = build_atlas(rgby(32), 0, false, false).unwrap();
        assert_eq!(atlas.width(), 64);
        assert_eq!(atlas.height(), 64);
        assert_eq!(atlas.sprite_count(), 4);

        let names: Vec<_> = atlas.sprites().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["r", "g", "b", "y"]);
    }

    #[test]
    fn test_blit_roundtrip() {
        let sprites = vec![
            patterned("a", 17, 9, 1),
            patterned("b", 5, 30, 2),
            patterned("c", 12, 12, 3),
        ];
        let originals: Vec<_> = sprites.iter().map(|s| s.pixels().clone()).collect();

        let atlas = build_atlas(sprites, 2, false, true).unwrap();
        for (i, original) in originals.iter().enumerate() {
            let rect = atlas.sprite_rect(i).unwrap();
            for y in 0..rect.height {
                for x in 0..rect.width {
                    assert_eq!(
                        atlas.pixels().get(rect.x + x, rect.y + y).unwrap(),
                        original.get(x, y).unwrap()
                    );
                }
            }
        }

        assert_eq!(&atlas.extract_sprite("b").unwrap(), &originals[1]);
    }

    #[test]
    fn test_region_normalization() {
        let sprites = vec![patterned("wide", 40, 10, 0), patterned("tall", 10, 40, 0)];
        let atlas = build_atlas(sprites, 1, false, false).unwrap();
        let (w, h) = (atlas.width() as f32, atlas.height() as f32);

        for i in 0..atlas.sprite_count() {
            let rect = atlas.sprite_rect(i).unwrap();
            let region = atlas.sprite_at(i).unwrap().region;
            assert!((region.u_min - rect.x as f32 / w).abs() < 1e-6);
            assert!((region.v_min - rect.y as f32 / h).abs() < 1e-6);
            assert!((region.u_max - (rect.x + rect.width) as f32 / w).abs() < 1e-6);
            assert!((region.v_max - (rect.y + rect.height) as f32 / h).abs() < 1e-6);
            assert!(!region.is_flipped());
        }
    }

    #[test]
    fn test_flip_y_swaps_vertical_bounds() {
        let plain = build_atlas(rgby(8), 0, false, false).unwrap();
        let flipped = build_atlas(rgby(8), 0, true, false).unwrap();

        for (a, b) in plain.sprites().iter().zip(flipped.sprites()) {
            assert!(b.region.is_flipped());
            assert!(b.region.v_min > b.region.v_max);
            assert_eq!(b.region.u_min, a.region.u_min);
            assert_eq!(b.region.u_max, a.region.u_max);
            assert_eq!(b.region.v_min, a.region.v_max);
            assert_eq!(b.region.v_max, a.region.v_min);
            assert!((b.region.height() + a.region.height()).abs() < 1e-6);
        }
        assert_eq!(plain.pixels(), flipped.pixels());
    }

    #[test]
    fn test_bleeding_sprites() {
        let atlas = build_atlas(rgby(32), 4, false, true).unwrap();
        assert_eq!(atlas.width(), 128);
        assert_eq!(atlas.height(), 128);
        assert_eq!(atlas.sprite_count(), 4);

        let pixels = atlas.pixels();
        let r = atlas.sprite_rect(0).unwrap();
        assert_eq!((r.x, r.y), (4, 4));
        let red = pixels.get(r.x, r.y).unwrap();

        for step in 1..=4 {
            // left, right, above, below
            assert_eq!(pixels.get(r.x - step, r.y).unwrap(), red);
            assert_eq!(pixels.get(r.x + r.width - 1 + step, r.y).unwrap(), red);
            assert_eq!(pixels.get(r.x, r.y - step).unwrap(), red);
            assert_eq!(pixels.get(r.x, r.y + r.height - 1 + step).unwrap(), red);
        }

        // corners
        assert_eq!(pixels.get(0, 0).unwrap(), red);
        assert_eq!(pixels.get(3, 0).unwrap(), red);
        assert_eq!(pixels.get(0, 3).unwrap(), red);
        assert_eq!(pixels.get(3, 3).unwrap(), red);

        // the next sprite over keeps its own gutter
        let g = atlas.sprite_rect(1).unwrap();
        let green = pixels.get(g.x, g.y).unwrap();
        assert_eq!(pixels.get(g.x - 1, g.y).unwrap(), green);
        assert_eq!(pixels.get(g.x - 4, g.y).unwrap(), green);
        assert_eq!(pixels.get(r.x + r.width + 3, r.y).unwrap(), red);
    }

    #[test]
    fn test_bleed_every_border_texel() {
        let sprites = vec![patterned("p", 6, 5, 9), patterned("q", 4, 7, 7)];
        let atlas = build_atlas(sprites, 3, false, true).unwrap();
        let pixels = atlas.pixels();

        for i in 0..atlas.sprite_count() {
            let r = atlas.sprite_rect(i).unwrap();
            for step in 1..=3 {
                for dx in 0..r.width {
                    let top = pixels.get(r.x + dx, r.y).unwrap();
                    let bottom = pixels.get(r.x + dx, r.y + r.height - 1).unwrap();
                    assert_eq!(pixels.get(r.x + dx, r.y - step).unwrap(), top);
                    assert_eq!(pixels.get(r.x + dx, r.y + r.height - 1 + step).unwrap(), bottom);
                }
                for dy in 0..r.height {
                    let left = pixels.get(r.x, r.y + dy).unwrap();
                    let right = pixels.get(r.x + r.width - 1, r.y + dy).unwrap();
                    assert_eq!(pixels.get(r.x - step, r.y + dy).unwrap(), left);
                    assert_eq!(pixels.get(r.x + r.width - 1 + step, r.y + dy).unwrap(), right);
                }
            }
        }
    }

    #[test]
    fn test_bleed_requires_padding() {
        let plain = build_atlas(rgby(8), 0, false, false).unwrap();
        let bled = build_atlas(rgby(8), 0, false, true).unwrap();
        assert_eq!(plain.pixels(), bled.pixels());
    }

    #[test]
    fn test_lookup_by_name() {
        let sprites = vec![
            solid("dup", 4, [1, 1, 1, 1]),
            solid("other", 8, [2, 2, 2, 2]),
            solid("dup", 2, [3, 3, 3, 3]),
        ];
        let atlas = build_atlas(sprites, 0, false, false).unwrap();

        assert!(atlas.contains("other"));
        assert!(!atlas.contains("missing"));
        assert_eq!(atlas.sprite("dup").unwrap(), atlas.sprite_at(0).unwrap());
        assert!(matches!(atlas.sprite("missing"), Err(AtlasError::NotFound(_))));
        assert!(matches!(atlas.extract_sprite("missing"), Err(AtlasError::NotFound(_))));
    }

    #[test]
    fn test_lookup_by_index() {
        let atlas = build_atlas(rgby(4), 0, false, false).unwrap();
        assert_eq!(atlas.sprite_at(3).unwrap().name, "y");
        assert!(matches!(atlas.sprite_at(4), Err(AtlasError::OutOfRange(_))));
        assert!(matches!(atlas.sprite_rect(4), Err(AtlasError::OutOfRange(_))));
    }

    #[test]
    fn test_atlas_region_transform() {
        let region = AtlasRegion {
            u_min: 0.25,
            v_min: 0.5,
            u_max: 0.5,
            v_max: 0.75,
        };

        let [u, v] = region.transform_uv(0.0, 0.0);
        assert!((u - 0.25).abs() < 0.001);
        assert!((v - 0.5).abs() < 0.001);

        let [u, v] = region.transform_uv(1.0, 1.0);
        assert!((u - 0.5).abs() < 0.001);
        assert!((v - 0.75).abs() < 0.001);

        let [_, v] = region.flipped_y().transform_uv(0.0, 0.0);
        assert!((v - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_config_builders() {
        let config = AtlasConfig::default().with_padding(2).with_flip_y(true).with_bleed(true);
        assert_eq!(config.padding, 2);
        assert!(config.flip_y());
        assert!(config.bleed());
        assert!(!config.with_bleed(false).bleed());
    }
}
