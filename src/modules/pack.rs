use std::path::{Path, PathBuf};

use log::{info, warn};
use rayon::prelude::*;
use spr::{SprWriter, SpriteImage};

use crate::{
    err,
    utils::{
        constants::SPRITE_FILE_EXTENSION,
        misc::{find_files_with_ext_in_folder, sprite_id_from_path},
    },
};

/// Builds an archive from `sprite_NNNNN.png` files. Ids without a file become empty sprites.
pub fn pack_images(paths: &[PathBuf], signature: u32) -> eyre::Result<SprWriter> {
    let numbered = paths
        .iter()
        .filter_map(|path| match sprite_id_from_path(path) {
            Some(sprite_id) => Some((sprite_id, path)),
            None => {
                warn!(
                    "Skipping `{}`, not a numbered sprite in 1..={}",
                    path.display(),
                    u16::MAX
                );
                None
            }
        })
        .collect::<Vec<_>>();

    let sprites = numbered
        .par_iter()
        .map(|(sprite_id, path)| -> eyre::Result<(usize, SpriteImage)> {
            let image = image::open(path)?.into_rgba8();

            let sprite = SpriteImage::from_rgba8(&image).map_err(|op| {
                eyre::eyre!("`{}`: {}", path.display(), op)
            })?;

            Ok((*sprite_id, sprite))
        })
        .collect::<eyre::Result<Vec<_>>>()?;

    let mut writer = SprWriter::new(signature);

    for (sprite_id, sprite) in sprites {
        writer.set(sprite_id, sprite)?;
    }

    Ok(writer)
}

/// Packs every numbered PNG in a folder into a `.spr`. Returns how many sprites were packed.
pub fn pack_directory(
    input_dir: impl AsRef<Path>,
    output: impl AsRef<Path>,
    signature: u32,
) -> eyre::Result<usize> {
    let input_dir = input_dir.as_ref();

    if !input_dir.is_dir() {
        return err!("`{}` is not a folder", input_dir.display());
    }

    let paths = find_files_with_ext_in_folder(input_dir, SPRITE_FILE_EXTENSION)?;
    let writer = pack_images(&paths, signature)?;

    let packed = writer.sprites.iter().filter(|sprite| sprite.is_some()).count();

    info!(
        "Packing {} sprites ({} ids) into {}",
        packed,
        writer.sprites.len(),
        output.as_ref().display()
    );

    std::fs::write(output.as_ref(), writer.write_to_bytes()?)?;

    Ok(packed)
}
