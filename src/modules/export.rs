use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

use log::{info, warn};
use rayon::prelude::*;
use spr::{DecodeOptions, Spr};

use crate::{
    err,
    utils::{constants::PROGRESS_INTERVAL, misc::sprite_file_name},
};

/// Writes one sprite as PNG.
///
/// Returns `false` when the archive has no such sprite.
pub fn export_sprite(
    spr: &Spr,
    sprite_id: usize,
    path: impl AsRef<Path>,
    options: &DecodeOptions,
) -> eyre::Result<bool> {
    let Some(sprite) = spr.sprite(sprite_id, options) else {
        return Ok(false);
    };

    sprite.to_rgba8().save(path.as_ref())?;

    Ok(true)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub succeeded: usize,
    pub failed: usize,
}

impl ExportReport {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Dumps a range of sprites into a folder as `sprite_NNNNN.png`.
pub struct ExportAll {
    output_dir: Option<PathBuf>,
    max_sprites: Option<usize>,
    options: DecodeOptions,
}

impl Default for ExportAll {
    fn default() -> Self {
        Self {
            output_dir: None,
            max_sprites: None,
            options: DecodeOptions::default(),
        }
    }
}

impl ExportAll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_dir(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_dir = Some(path.into());

        self
    }

    /// Only export ids `1..=max`. `None` or 0 exports everything.
    pub fn max_sprites(&mut self, max: Option<usize>) -> &mut Self {
        self.max_sprites = max;

        self
    }

    pub fn options(&mut self, options: DecodeOptions) -> &mut Self {
        self.options = options;

        self
    }

    pub fn work(&self, spr: &Spr) -> eyre::Result<ExportReport> {
        let Some(output_dir) = self.output_dir.as_ref() else {
            return err!("output_dir is not set");
        };

        if output_dir.exists() && !output_dir.is_dir() {
            return err!("`{}` is not a folder", output_dir.display());
        }

        fs::create_dir_all(output_dir)?;

        let count = self
            .max_sprites
            .filter(|max| *max > 0)
            .unwrap_or(spr.sprite_count())
            .min(spr.sprite_count());

        info!("Exporting {} sprites to {}", count, output_dir.display());

        let done = AtomicUsize::new(0);

        let exported = (1..=count)
            .into_par_iter()
            .map(|sprite_id| {
                let path = output_dir.join(sprite_file_name(sprite_id));
                let res = export_sprite(spr, sprite_id, &path, &self.options);

                let done = done.fetch_add(1, Ordering::Relaxed) + 1;
                if done % PROGRESS_INTERVAL == 0 {
                    info!("[{}/{}] sprites processed", done, count);
                }

                match res {
                    Ok(false) => {
                        warn!("Sprite {} is empty or out of bounds", sprite_id);
                        Ok(false)
                    }
                    rest => rest,
                }
            })
            .collect::<eyre::Result<Vec<bool>>>()?;

        let succeeded = exported.iter().filter(|ok| **ok).count();

        Ok(ExportReport {
            succeeded,
            failed: exported.len() - succeeded,
        })
    }
}
