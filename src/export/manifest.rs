//! JSON description of a built atlas.

use crate::atlas::{NamedRegion, TextureAtlas};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas size, build options and every sprite region of an atlas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasManifest {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub flip_y: bool,
    pub bleed: bool,
    pub sprites: Vec<NamedRegion>,
}

impl AtlasManifest {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Look up a sprite region by name.
    pub fn sprite(&self, name: &str) -> Option<&NamedRegion> {
        self.sprites.iter().find(|s| s.name == name)
    }
}

impl TextureAtlas {
    /// Describe this atlas for serialization.
    pub fn manifest(&self) -> AtlasManifest {
        let config = self.config();
        AtlasManifest {
            width: self.width(),
            height: self.height(),
            padding: config.padding,
            flip_y: config.flip_y(),
            bleed: config.bleed(),
            sprites: self.sprites().to_vec(),
        }
    }
}
