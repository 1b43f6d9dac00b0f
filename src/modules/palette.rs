use std::path::Path;

use image::RgbImage;
use spr::generate_palette;

use crate::utils::constants::PALETTE_SWATCH_SIDE;

/// One pixel per palette entry, 16 entries per row.
pub fn palette_swatch() -> RgbImage {
    let palette = generate_palette();

    RgbImage::from_fn(PALETTE_SWATCH_SIDE, PALETTE_SWATCH_SIDE, |x, y| {
        palette[(y * PALETTE_SWATCH_SIDE + x) as usize].into()
    })
}

pub fn write_palette_swatch(path: impl AsRef<Path>) -> eyre::Result<()> {
    palette_swatch().save(path.as_ref())?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn swatch_layout() {
        let swatch = palette_swatch();

        assert_eq!(swatch.dimensions(), (16, 16));
        assert_eq!(swatch.get_pixel(0, 0).0, [255, 0, 255]);
        assert_eq!(swatch.get_pixel(1, 0).0, [0, 0, 0]);
        assert_eq!(swatch.get_pixel(2, 0).0, [0, 0, 51]);
        // 216
        assert_eq!(swatch.get_pixel(8, 13).0, [255, 255, 255]);
        // 240
        assert_eq!(swatch.get_pixel(0, 15).0, [255, 255, 255]);
        assert_eq!(swatch.get_pixel(15, 15).0, [0, 0, 0]);
    }

    #[test]
    fn swatch_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("palette.png");

        write_palette_swatch(&path).unwrap();

        let image = image::open(&path).unwrap().into_rgb8();
        assert_eq!(image, palette_swatch());
    }
}
