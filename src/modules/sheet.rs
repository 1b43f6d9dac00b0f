use std::path::Path;

use log::info;
use spr::{DecodeOptions, Spr};

/// Composes a sprite sheet and saves it. Returns the sheet dimensions.
pub fn write_sheet(
    spr: &Spr,
    path: impl AsRef<Path>,
    sprites_per_row: usize,
    max_sprites: Option<usize>,
    options: &DecodeOptions,
) -> eyre::Result<(u32, u32)> {
    let sheet = spr.compose_sheet(sprites_per_row, max_sprites, options)?;

    info!(
        "Writing {}x{} sprite sheet to {}",
        sheet.width(),
        sheet.height(),
        path.as_ref().display()
    );

    sheet.save(path.as_ref())?;

    Ok(sheet.dimensions())
}
