//! Sprite loading from PNG files, directories and ZIP archives.
//!
//! Nothing in the packing core calls into this module; it only turns encoded
//! images into [`InputSprite`]s for callers that start from files.

use crate::atlas::InputSprite;
use crate::error::{AtlasError, Result};
use crate::types::PixelBuffer;
use log::warn;
use std::io::Read;
use std::path::Path;

/// Decode PNG bytes into a named sprite.
pub fn load_sprite_from_png(name: impl Into<String>, data: &[u8]) -> Result<InputSprite> {
    InputSprite::new(name, decode_png(data)?)
}

/// Decode PNG bytes into a pixel buffer.
pub fn decode_png(data: &[u8]) -> Result<PixelBuffer> {
    let img = image::load_from_memory_with_format(data, image::ImageFormat::Png)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba8(width, height, rgba.as_raw())
}

/// Load every PNG under `path`, which may be a directory or a ZIP file.
///
/// Sprites are named by their path relative to the root, with `/` separators
/// and without the `.png` extension, and returned sorted by name. Files that
/// fail to decode are skipped with a warning.
pub fn load_sprites_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<InputSprite>> {
    let path = path.as_ref();

    if path.is_dir() {
        load_from_directory(path)
    } else {
        let data = std::fs::read(path)?;
        load_sprites_from_bytes(&data)
    }
}

/// Load every PNG inside a ZIP archive.
pub fn load_sprites_from_bytes(data: &[u8]) -> Result<Vec<InputSprite>> {
    let cursor = std::io::Cursor::new(data);
    let mut archive = zip::ZipArchive::new(cursor)?;

    let mut sprites = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.is_dir() {
            continue;
        }

        let file_path = file.name().to_string();
        let Some(name) = file_path.strip_suffix(".png") else {
            continue;
        };

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        push_decoded(&mut sprites, name, &contents);
    }

    sort_by_name(&mut sprites);
    Ok(sprites)
}

fn load_from_directory(root: &Path) -> Result<Vec<InputSprite>> {
    let mut sprites = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }

            let name = sprite_name(root, &path)?;
            let contents = std::fs::read(&path)?;
            push_decoded(&mut sprites, &name, &contents);
        }
    }

    sort_by_name(&mut sprites);
    Ok(sprites)
}

/// Relative path without extension, `/`-separated.
fn sprite_name(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        AtlasError::InvalidInput(format!("{} is not under {}", path.display(), root.display()))
    })?;

    let parts: Vec<_> = relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn push_decoded(sprites: &mut Vec<InputSprite>, name: &str, contents: &[u8]) {
    match load_sprite_from_png(name, contents) {
        Ok(sprite) => sprites.push(sprite),
        Err(e) => warn!("Skipping sprite {}: {}", name, e),
    }
}

fn sort_by_name(sprites: &mut [InputSprite]) {
    sprites.sort_by(|a, b| a.name().cmp(b.name()));
}
