//! Six-face cubemap assembly.
//!
//! Faces are stored back to back in a single texel array, in the order
//! +X, -X, +Y, -Y, +Z, -Z (right, left, up, down, forward, back).

use crate::error::{AtlasError, Result};
use crate::types::{copy_rows, PixelBuffer, Texel};
use log::debug;

/// A cubemap face, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Back,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::Right,
        CubeFace::Left,
        CubeFace::Up,
        CubeFace::Down,
        CubeFace::Forward,
        CubeFace::Back,
    ];

    /// Position of this face in the texel array.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Named cubemap inputs.
#[derive(Debug, Clone, Copy)]
pub struct CubemapFaces<'a> {
    pub right: &'a PixelBuffer,
    pub left: &'a PixelBuffer,
    pub up: &'a PixelBuffer,
    pub down: &'a PixelBuffer,
    pub forward: &'a PixelBuffer,
    pub back: &'a PixelBuffer,
}

impl<'a> CubemapFaces<'a> {
    /// Faces in storage order.
    pub fn ordered(&self) -> [&'a PixelBuffer; 6] {
        [self.right, self.left, self.up, self.down, self.forward, self.back]
    }

    pub fn assemble(&self, flip_y: bool) -> Result<Cubemap> {
        assemble_cubemap(self.ordered(), flip_y)
    }
}

/// Six equal-sized faces in one contiguous buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cubemap {
    face_width: u32,
    face_height: u32,
    texels: Vec<Texel>,
}

impl Cubemap {
    pub fn face_width(&self) -> u32 {
        self.face_width
    }

    pub fn face_height(&self) -> u32 {
        self.face_height
    }

    fn face_len(&self) -> usize {
        self.face_width as usize * self.face_height as usize
    }

    /// All texels, face after face.
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    pub fn face(&self, face: CubeFace) -> &[Texel] {
        let len = self.face_len();
        &self.texels[face.index() * len..(face.index() + 1) * len]
    }

    pub fn face_mut(&mut self, face: CubeFace) -> &mut [Texel] {
        let len = self.face_len();
        &mut self.texels[face.index() * len..(face.index() + 1) * len]
    }

    /// Copy one face out as its own buffer.
    pub fn face_buffer(&self, face: CubeFace) -> PixelBuffer {
        PixelBuffer::from_raw(self.face_width, self.face_height, self.face(face).to_vec())
    }

    /// The whole cubemap as a vertical strip, `width` x `height * 6`.
    pub fn into_strip(self) -> PixelBuffer {
        let height = self.face_height * 6;
        PixelBuffer::from_raw(self.face_width, height, self.texels)
    }
}

/// Assemble six faces, given in storage order, into one cubemap.
///
/// With `flip_y` every face is mirrored vertically while copying.
pub fn assemble_cubemap(faces: [&PixelBuffer; 6], flip_y: bool) -> Result<Cubemap> {
    let (width, height) = faces[0].dimensions();
    for (face, buffer) in CubeFace::ALL.iter().zip(faces.iter()).skip(1) {
        if buffer.dimensions() != (width, height) {
            return Err(AtlasError::SizeMismatch(format!(
                "cubemap face {:?} is {} but {:?} is {}x{}",
                face,
                buffer,
                CubeFace::Right,
                width,
                height
            )));
        }
    }

    let face_len = width as usize * height as usize;
    let mut texels = vec![Texel::TRANSPARENT; face_len * 6];
    for (destination, source) in texels.chunks_exact_mut(face_len.max(1)).zip(faces.iter()) {
        copy_rows(source.texels(), destination, width as usize, flip_y);
    }

    debug!("assembled {}x{} cubemap (flip_y {})", width, height, flip_y);

    Ok(Cubemap {
        face_width: width,
        face_height: height,
        texels,
    })
}
