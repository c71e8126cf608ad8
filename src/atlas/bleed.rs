//! Edge bleeding into the padding gutter.
//!
//! Bilinear filtering near a sprite border reads one texel past it. Copying
//! border texels outward keeps those reads on the sprite's own colors instead
//! of a neighbour's or the empty canvas.

use crate::error::{AtlasError, Result};
use crate::types::{PixelBuffer, Texel};

/// A sprite's texel rectangle inside an atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SpriteRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x - self.x < self.width && y - self.y < self.height
    }
}

/// Extend the border texels of every rect `padding` texels outward.
///
/// Each border is walked with `padding` extra steps at both ends so the
/// corners get covered. A gutter texel reached by two borders keeps the
/// rounded mean of both. Writes falling outside the buffer or inside any of
/// `rects` are dropped, so tightly packed rects keep their texels.
pub fn bleed_edges(atlas: &mut PixelBuffer, rects: &[SpriteRect], padding: u32) -> Result<()> {
    for rect in rects {
        let inside = rect.x.checked_add(rect.width).is_some_and(|r| r <= atlas.width())
            && rect.y.checked_add(rect.height).is_some_and(|b| b <= atlas.height());
        if !inside {
            return Err(AtlasError::OutOfRange(format!(
                "sprite rect {:?} is outside the {} atlas",
                rect, atlas
            )));
        }
    }

    if padding == 0 {
        return Ok(());
    }

    let mut sprite_texels = vec![false; atlas.len()];
    for rect in rects {
        for y in rect.y..rect.y + rect.height {
            let row = y as usize * atlas.width() as usize;
            let start = row + rect.x as usize;
            sprite_texels[start..start + rect.width as usize].fill(true);
        }
    }

    let mut gutter = Gutter {
        written: vec![false; atlas.len()],
        sprite_texels,
        atlas,
    };
    for rect in rects.iter().filter(|r| r.width > 0 && r.height > 0) {
        gutter.bleed_rect(rect, padding as i64);
    }

    Ok(())
}

struct Gutter<'a> {
    atlas: &'a mut PixelBuffer,
    /// Texels already written by a bleed pass.
    written: Vec<bool>,
    /// Texels covered by some rect; never written.
    sprite_texels: Vec<bool>,
}

impl Gutter<'_> {
    fn bleed_rect(&mut self, rect: &SpriteRect, padding: i64) {
        let x = rect.x as i64;
        let y = rect.y as i64;
        let width = rect.width as i64;
        let height = rect.height as i64;

        // Top and bottom borders.
        for i in -padding..width + padding {
            let source_x = x + i.clamp(0, width - 1);
            let top = self.read(source_x, y);
            let bottom = self.read(source_x, y + height - 1);
            for step in 1..=padding {
                self.write(x + i, y - step, top);
                self.write(x + i, y + height - 1 + step, bottom);
            }
        }

        // Left and right borders.
        for j in -padding..height + padding {
            let source_y = y + j.clamp(0, height - 1);
            let left = self.read(x, source_y);
            let right = self.read(x + width - 1, source_y);
            for step in 1..=padding {
                self.write(x - step, y + j, left);
                self.write(x + width - 1 + step, y + j, right);
            }
        }
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        self.atlas.index_of(u32::try_from(x).ok()?, u32::try_from(y).ok()?)
    }

    /// Reads only ever land on a rect's own border, which was checked to be inside.
    fn read(&self, x: i64, y: i64) -> Texel {
        self.index(x, y)
            .map(|index| self.atlas.texels()[index])
            .unwrap_or_default()
    }

    fn write(&mut self, x: i64, y: i64, texel: Texel) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        if self.sprite_texels[index] {
            return;
        }

        let texels = self.atlas.texels_mut();
        if self.written[index] {
            texels[index] = Texel::average(texels[index], texel);
        } else {
            texels[index] = texel;
            self.written[index] = true;
        }
    }
}
