pub const DEFAULT_SPRITES_PER_ROW: usize = 32;

/// Batch export logs once every this many sprites.
pub const PROGRESS_INTERVAL: usize = 100;

pub const SPRITE_FILE_PREFIX: &str = "sprite_";
pub const SPRITE_FILE_EXTENSION: &str = "png";

pub const PALETTE_SWATCH_SIDE: u32 = 16;
