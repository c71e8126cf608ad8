//! The RGBA8 texel.

use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single 8-bit RGBA texel. Channels are straight (not premultiplied).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Texel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Texel {
    pub const TRANSPARENT: Texel = Texel::new(0, 0, 0, 0);
    pub const BLACK: Texel = Texel::new(0, 0, 0, 255);
    pub const WHITE: Texel = Texel::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack from `0xRRGGBBAA`.
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: (value >> 24) as u8,
            g: (value >> 16) as u8,
            b: (value >> 8) as u8,
            a: value as u8,
        }
    }

    /// Pack into `0xRRGGBBAA`.
    pub const fn as_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::new(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Normalized float channels (`byte / 255`).
    pub fn to_vec4(self) -> Vec4 {
        Vec4::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        )
    }

    /// Componentwise rounded mean of two texels.
    pub fn average(a: Texel, b: Texel) -> Texel {
        fn mean(x: u8, y: u8) -> u8 {
            ((x as u16 + y as u16 + 1) / 2) as u8
        }

        Texel {
            r: mean(a.r, b.r),
            g: mean(a.g, b.g),
            b: mean(a.b, b.b),
            a: mean(a.a, b.a),
        }
    }
}

impl From<[u8; 4]> for Texel {
    fn from(rgba: [u8; 4]) -> Self {
        Self::from_array(rgba)
    }
}

impl From<Texel> for [u8; 4] {
    fn from(texel: Texel) -> Self {
        texel.to_array()
    }
}

impl fmt::Display for Texel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.r, self.g, self.b, self.a)
    }
}
