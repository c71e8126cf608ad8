//! Flag sets for texture construction.

bitflags::bitflags! {
    /// Texel channels, used to spread single-channel data across a sprite.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Channels: u8 {
        const RED = 1 << 0;
        const GREEN = 1 << 1;
        const BLUE = 1 << 2;
        const ALPHA = 1 << 3;
        const RGB = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
        const RGBA = Self::RGB.bits() | Self::ALPHA.bits();
    }
}

bitflags::bitflags! {
    /// How an atlas or cubemap is laid out.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TextureFlags: u8 {
        /// Flip vertically for renderers with a bottom-left texture origin.
        const FLIP_Y = 1 << 0;
        /// Extend sprite edges into the padding gutter.
        const BLEED_PIXELS = 1 << 1;
    }
}
