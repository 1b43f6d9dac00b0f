use std::{
    fs,
    path::{Path, PathBuf},
};

use super::constants::{SPRITE_FILE_EXTENSION, SPRITE_FILE_PREFIX};

pub fn maybe_add_extension_to_string(s: &str, ext: &str) -> String {
    let ext_with_dot = format!(".{}", ext);

    if s.ends_with(&ext_with_dot) {
        s.to_string()
    } else {
        format!("{}.{}", s, ext)
    }
}

pub fn find_files_with_ext_in_folder(path: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let rd = fs::read_dir(path)?;
    let paths = rd.filter_map(|path| path.ok()).map(|path| path.path());
    let ext_paths = paths
        .filter(|path| path.extension().is_some_and(|path_ext| path_ext == ext))
        .collect();

    Ok(ext_paths)
}

/// `sprite_00042.png`
pub fn sprite_file_name(sprite_id: usize) -> String {
    format!(
        "{}{:05}.{}",
        SPRITE_FILE_PREFIX, sprite_id, SPRITE_FILE_EXTENSION
    )
}

/// Reverse of [`sprite_file_name`]. Takes any amount of zero padding.
///
/// Only ids an archive can hold, `1..=u16::MAX`, are accepted.
pub fn sprite_id_from_path(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let sprite_id = stem.strip_prefix(SPRITE_FILE_PREFIX)?.parse::<u16>().ok()?;

    (sprite_id >= 1).then_some(sprite_id as usize)
}

#[macro_export]
macro_rules! err {
    ($e: ident) => {{
        use eyre::eyre;

        Err(eyre!($e))
    }};

    ($format_string: literal) => {{
        use eyre::eyre;

        Err(eyre!($format_string))
    }};

    ($($arg:tt)*) => {{
        use eyre::eyre;

        Err(eyre!($($arg)*))
    }};
}
