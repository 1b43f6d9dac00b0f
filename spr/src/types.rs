/// Sprites are always 32x32.
pub const SPRITE_SIDE: u32 = 32;
pub const SPRITE_PIXELS: usize = (SPRITE_SIDE * SPRITE_SIDE) as usize;

/// 4 bytes signature + 2 bytes sprite count
pub const HEADER_SIZE: usize = 6;

pub type Rgb = [u8; 3];

/// RGBA. Alpha is either 0 or 255 for anything coming out of the decoder.
pub type Pixel = [u8; 4];

pub const TRANSPARENT_PIXEL: Pixel = [0, 0, 0, 0];

pub type Palette = [Rgb; 256];

pub struct SprHeader {
    pub signature: u32,
    pub sprite_count: u16,
}

/// A loaded `.spr` archive.
///
/// The whole file stays in memory. Sprite blocks are borrowed out of it on demand.
pub struct Spr {
    pub header: SprHeader,
    /// 1-based. `offsets[0]` is always 0 and never points at a sprite.
    pub offsets: Vec<u32>,
    pub data: Vec<u8>,
}

/// Exactly [`SPRITE_PIXELS`] pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteImage(pub(crate) Vec<Pixel>);

/// Replacement colors for the four outfit template colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutfitColors {
    /// Replaces yellow.
    pub head: Rgb,
    /// Replaces red.
    pub body: Rgb,
    /// Replaces green.
    pub legs: Rgb,
    /// Replaces blue.
    pub feet: Rgb,
}

impl Default for OutfitColors {
    fn default() -> Self {
        Self {
            head: [117, 94, 71],
            body: [145, 100, 72],
            legs: [72, 72, 72],
            feet: [76, 76, 76],
        }
    }
}

/// Everything that happens to a sprite after it is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// When off, transparent pixels are painted with the palette sentinel color.
    pub transparency: bool,
    pub remap: Option<OutfitColors>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            transparency: true,
            remap: None,
        }
    }
}
