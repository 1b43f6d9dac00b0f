#[derive(Debug, thiserror::Error)]
pub enum SprError {
    #[error("File is too short for a header: {length} bytes")]
    TruncatedHeader { length: usize },
    #[error("Offset table for {sprite_count} sprites needs {expect} bytes. Have ({have})")]
    TruncatedOffsetTable {
        sprite_count: u16,
        expect: usize,
        have: usize,
    },
    #[error("Cannot lay out a sheet with {sprites_per_row} sprites per row")]
    InvalidSheetLayout { sprites_per_row: usize },
    #[error("Archive can hold at most {max} sprites. Have ({have})", max = u16::MAX)]
    TooManySprites { have: usize },
    #[error("Sprite ids start at 1. Have ({sprite_id})")]
    InvalidSpriteId { sprite_id: usize },
    #[error("Sprite must be 32x32. Have ({width}x{height})")]
    InvalidSpriteSize { width: u32, height: u32 },
    #[error("Error opening sprite file: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
