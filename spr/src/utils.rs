use std::{ffi::OsStr, path::Path};

use image::{imageops, RgbaImage};
use log::debug;
use rayon::prelude::*;

use crate::{
    error::SprError,
    palette::generate_palette,
    parser::{decode_sprite, parse_tables},
    DecodeOptions, OutfitColors, Pixel, Spr, SpriteImage, SPRITE_PIXELS, SPRITE_SIDE,
};

const HEAD_TEMPLATE: [u8; 3] = [255, 255, 0];
const BODY_TEMPLATE: [u8; 3] = [255, 0, 0];
const LEGS_TEMPLATE: [u8; 3] = [0, 255, 0];
const FEET_TEMPLATE: [u8; 3] = [0, 0, 255];

impl Spr {
    pub fn open_from_bytes(bytes: Vec<u8>) -> Result<Spr, SprError> {
        let (header, offsets) = parse_tables(&bytes)?;

        debug!(
            "spr signature {:#010x}, {} sprites, offset table ends at {}",
            header.signature,
            header.sprite_count,
            crate::HEADER_SIZE + header.sprite_count as usize * 4
        );

        Ok(Spr {
            header,
            offsets,
            data: bytes,
        })
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Spr, SprError> {
        let bytes = std::fs::read(path)?;

        Self::open_from_bytes(bytes)
    }

    pub fn sprite_count(&self) -> usize {
        self.header.sprite_count as usize
    }

    /// Byte range of a sprite's compressed block.
    ///
    /// `None` when the id is out of `1..=sprite_count`, the sprite is empty (offset 0), or the
    /// table points outside of the file.
    pub fn sprite_block(&self, sprite_id: usize) -> Option<&[u8]> {
        if sprite_id < 1 || sprite_id > self.sprite_count() {
            return None;
        }

        let start = self.offsets[sprite_id] as usize;

        if start == 0 {
            return None;
        }

        let end = if sprite_id < self.sprite_count() {
            self.offsets[sprite_id + 1] as usize
        } else {
            self.data.len()
        };

        // a following empty sprite means this one runs to the end of the file
        let end = if end == 0 { self.data.len() } else { end };

        if end <= start || end > self.data.len() {
            return None;
        }

        Some(&self.data[start..end])
    }

    /// Extracts, decodes and post-processes one sprite.
    pub fn sprite(&self, sprite_id: usize, options: &DecodeOptions) -> Option<SpriteImage> {
        let block = self.sprite_block(sprite_id)?;
        let mut image = decode_sprite(block);

        if let Some(colors) = options.remap.as_ref() {
            image = image.remap(colors);
        }

        if !options.transparency {
            image = image.opaque();
        }

        Some(image)
    }

    /// Lays out the first `max_sprites` sprites (all of them with `None` or `Some(0)`) on a grid.
    ///
    /// Sprite `n` lands in cell `n - 1`, counting left to right then top to bottom. Sprites that
    /// cannot be found leave their cell transparent.
    pub fn compose_sheet(
        &self,
        sprites_per_row: usize,
        max_sprites: Option<usize>,
        options: &DecodeOptions,
    ) -> Result<RgbaImage, SprError> {
        if sprites_per_row == 0 {
            return Err(SprError::InvalidSheetLayout { sprites_per_row });
        }

        let count = max_sprites
            .filter(|max| *max > 0)
            .unwrap_or(self.sprite_count())
            .min(self.sprite_count());

        let rows = count.div_ceil(sprites_per_row);
        let side = |cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(SPRITE_SIDE))
        };

        let (Some(width), Some(height)) = (side(sprites_per_row), side(rows)) else {
            return Err(SprError::InvalidSheetLayout { sprites_per_row });
        };

        let mut sheet = RgbaImage::new(width, height);

        debug!(
            "composing {}x{} sheet with {} sprites",
            sheet.width(),
            sheet.height(),
            count
        );

        let sprites = (1..=count)
            .into_par_iter()
            .filter_map(|sprite_id| self.sprite(sprite_id, options).map(|image| (sprite_id, image)))
            .collect::<Vec<_>>();

        // cells never overlap so order does not matter
        sprites.iter().for_each(|(sprite_id, image)| {
            let (x, y) = sheet_cell(*sprite_id, sprites_per_row);
            imageops::replace(&mut sheet, &image.to_rgba8(), x, y);
        });

        Ok(sheet)
    }
}

/// Pixel position of a sprite's top-left corner on a sheet.
///
/// `sprite_id` starts at 1 and `sprites_per_row` is never 0. [`Spr::compose_sheet`] checks both.
pub(crate) fn sheet_cell(sprite_id: usize, sprites_per_row: usize) -> (i64, i64) {
    let row = (sprite_id - 1) / sprites_per_row;
    let col = (sprite_id - 1) % sprites_per_row;

    (
        col as i64 * SPRITE_SIDE as i64,
        row as i64 * SPRITE_SIDE as i64,
    )
}

impl SpriteImage {
    /// Fully transparent sprite.
    pub fn transparent() -> Self {
        Self(vec![crate::TRANSPARENT_PIXEL; SPRITE_PIXELS])
    }

    pub fn from_pixels(pixels: Vec<Pixel>) -> Option<Self> {
        (pixels.len() == SPRITE_PIXELS).then_some(Self(pixels))
    }

    pub fn from_rgba8(image: &RgbaImage) -> Result<Self, SprError> {
        if image.dimensions() != (SPRITE_SIDE, SPRITE_SIDE) {
            return Err(SprError::InvalidSpriteSize {
                width: image.width(),
                height: image.height(),
            });
        }

        Ok(Self(image.pixels().map(|pixel| pixel.0).collect()))
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.0
    }

    /// Swaps the outfit template colors for the given ones.
    ///
    /// Transparent pixels and every other color pass through untouched. Matching is exact.
    pub fn remap(&self, colors: &OutfitColors) -> SpriteImage {
        let pixels = self
            .0
            .iter()
            .map(|&pixel| {
                let [r, g, b, a] = pixel;

                if a == 0 {
                    return pixel;
                }

                let replacement = match [r, g, b] {
                    HEAD_TEMPLATE => colors.head,
                    BODY_TEMPLATE => colors.body,
                    LEGS_TEMPLATE => colors.legs,
                    FEET_TEMPLATE => colors.feet,
                    _ => return pixel,
                };

                [replacement[0], replacement[1], replacement[2], a]
            })
            .collect();

        SpriteImage(pixels)
    }

    /// Paints transparent pixels with the palette's transparency sentinel.
    pub fn opaque(&self) -> SpriteImage {
        let [r, g, b] = generate_palette()[0];

        let pixels = self
            .0
            .iter()
            .map(|&pixel| if pixel[3] == 0 { [r, g, b, 255] } else { pixel })
            .collect();

        SpriteImage(pixels)
    }

    pub fn to_rgba8(&self) -> RgbaImage {
        let mut image = RgbaImage::new(SPRITE_SIDE, SPRITE_SIDE);

        image
            .pixels_mut()
            .zip(self.0.iter())
            .for_each(|(dst, src)| *dst = (*src).into());

        image
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::TRANSPARENT_PIXEL;

    // header + table + blocks, offsets filled in from the blocks
    fn build_archive(blocks: &[Option<&[u8]>]) -> Vec<u8> {
        let mut bytes = vec![0x4c, 0x4f, 0x4c, 0x4f];
        bytes.extend((blocks.len() as u16).to_le_bytes());

        let mut next = 6 + blocks.len() * 4;
        let mut data = vec![];

        for block in blocks {
            match block {
                Some(block) => {
                    bytes.extend((next as u32).to_le_bytes());
                    next += block.len();
                    data.extend_from_slice(block);
                }
                None => bytes.extend(0u32.to_le_bytes()),
            }
        }

        bytes.extend(data);
        bytes
    }

    // one opaque pixel at position 0
    fn single_pixel_block(rgb: [u8; 3]) -> Vec<u8> {
        let mut block = vec![255, 0, 255, 7, 0, 0, 0, 1, 0];
        block.extend(rgb);
        block
    }

    #[test]
    fn offset_table_shape() {
        let a = single_pixel_block([1, 2, 3]);
        let archive = build_archive(&[Some(a.as_slice()), None, Some(a.as_slice())]);
        let spr = Spr::open_from_bytes(archive).unwrap();

        assert_eq!(spr.offsets.len(), spr.sprite_count() + 1);
        assert_eq!(spr.offsets[0], 0);
        assert_eq!(spr.offsets[2], 0);
    }

    #[test]
    fn sprite_block_not_found() {
        let a = single_pixel_block([1, 2, 3]);
        let spr = Spr::open_from_bytes(build_archive(&[Some(a.as_slice()), None])).unwrap();

        assert!(spr.sprite_block(0).is_none());
        assert!(spr.sprite_block(2).is_none());
        assert!(spr.sprite_block(3).is_none());
        assert!(spr.sprite_block(usize::MAX).is_none());
    }

    #[test]
    fn sprite_block_ranges() {
        let a = single_pixel_block([1, 2, 3]);
        let b = single_pixel_block([4, 5, 6]);
        let archive = build_archive(&[Some(a.as_slice()), Some(b.as_slice())]);
        let spr = Spr::open_from_bytes(archive).unwrap();

        assert_eq!(spr.sprite_block(1), Some(a.as_slice()));
        // last one runs to the end
        assert_eq!(spr.sprite_block(2), Some(b.as_slice()));
    }

    #[test]
    fn sprite_block_before_empty_runs_to_end() {
        let a = single_pixel_block([1, 2, 3]);
        let b = single_pixel_block([4, 5, 6]);
        let archive = build_archive(&[Some(a.as_slice()), None, Some(b.as_slice())]);
        let spr = Spr::open_from_bytes(archive).unwrap();

        let block = spr.sprite_block(1).unwrap();
        assert_eq!(block.len(), a.len() + b.len());
    }

    #[test]
    fn sprite_block_corrupt_table() {
        let mut bytes = vec![0, 0, 0, 0, 2, 0];
        // descending offsets then one pointing past the end
        bytes.extend(20u32.to_le_bytes());
        bytes.extend(16u32.to_le_bytes());
        bytes.extend([0; 8]);

        let spr = Spr::open_from_bytes(bytes.clone()).unwrap();
        assert!(spr.sprite_block(1).is_none());

        let mut bytes = vec![0, 0, 0, 0, 2, 0];
        bytes.extend(14u32.to_le_bytes());
        bytes.extend(500u32.to_le_bytes());
        bytes.extend([0; 8]);

        let spr = Spr::open_from_bytes(bytes).unwrap();
        assert!(spr.sprite_block(1).is_none());
        assert!(spr.sprite_block(2).is_none());
    }

    #[test]
    fn sprite_pipeline() {
        let block = single_pixel_block([255, 0, 0]);
        let spr = Spr::open_from_bytes(build_archive(&[Some(block.as_slice())])).unwrap();

        let plain = spr.sprite(1, &DecodeOptions::default()).unwrap();
        assert_eq!(plain.pixels()[0], [255, 0, 0, 255]);
        assert_eq!(plain.pixels()[1], TRANSPARENT_PIXEL);

        let options = DecodeOptions {
            transparency: false,
            remap: Some(OutfitColors::default()),
        };
        let outfit = spr.sprite(1, &options).unwrap();
        assert_eq!(outfit.pixels()[0], [145, 100, 72, 255]);
        assert_eq!(outfit.pixels()[1], [255, 0, 255, 255]);

        assert!(spr.sprite(2, &options).is_none());
    }

    #[test]
    fn remap_templates() {
        let mut pixels = vec![TRANSPARENT_PIXEL; SPRITE_PIXELS];
        pixels[0] = [255, 255, 0, 255];
        pixels[1] = [255, 0, 0, 255];
        pixels[2] = [0, 255, 0, 255];
        pixels[3] = [0, 0, 255, 255];
        pixels[4] = [254, 255, 0, 255];
        // transparent yellow stays transparent yellow
        pixels[5] = [255, 255, 0, 0];

        let image = SpriteImage::from_pixels(pixels).unwrap();
        let colors = OutfitColors {
            head: [1, 1, 1],
            body: [2, 2, 2],
            legs: [3, 3, 3],
            feet: [4, 4, 4],
        };
        let remapped = image.remap(&colors);
        let pixels = remapped.pixels();

        assert_eq!(pixels[0], [1, 1, 1, 255]);
        assert_eq!(pixels[1], [2, 2, 2, 255]);
        assert_eq!(pixels[2], [3, 3, 3, 255]);
        assert_eq!(pixels[3], [4, 4, 4, 255]);
        assert_eq!(pixels[4], [254, 255, 0, 255]);
        assert_eq!(pixels[5], [255, 255, 0, 0]);
    }

    #[test]
    fn remap_idempotent_with_defaults() {
        let mut pixels = vec![TRANSPARENT_PIXEL; SPRITE_PIXELS];
        pixels[0] = [255, 255, 0, 255];
        pixels[1] = [0, 0, 255, 255];
        pixels[2] = [10, 20, 30, 255];
        pixels[3] = [0, 0, 255, 0];

        let image = SpriteImage::from_pixels(pixels).unwrap();
        let once = image.remap(&OutfitColors::default());
        let twice = once.remap(&OutfitColors::default());

        assert_eq!(once, twice);
        assert_eq!(once.pixels()[3], [0, 0, 255, 0]);
    }

    #[test]
    fn sheet_layout() {
        assert_eq!(sheet_cell(1, 32), (0, 0));
        assert_eq!(sheet_cell(32, 32), (31 * 32, 0));
        assert_eq!(sheet_cell(33, 32), (0, 32));
        assert_eq!(sheet_cell(1089, 32), (0, 34 * 32));
    }

    #[test]
    fn sheet_dimensions() {
        let block = single_pixel_block([9, 9, 9]);
        let blocks = vec![Some(block.as_slice()); 1089];
        let spr = Spr::open_from_bytes(build_archive(&blocks)).unwrap();

        let sheet = spr
            .compose_sheet(32, None, &DecodeOptions::default())
            .unwrap();

        assert_eq!(sheet.width(), 32 * 32);
        // 1089 / 32 rounded up is 35 rows
        assert_eq!(sheet.height(), 35 * 32);
        assert_eq!(sheet.get_pixel(0, 32).0, [9, 9, 9, 255]);
        assert_eq!(sheet.get_pixel(1, 32).0, [0, 0, 0, 0]);

        let sheet = spr
            .compose_sheet(32, Some(1088), &DecodeOptions::default())
            .unwrap();

        assert_eq!(sheet.height(), 1088);
        assert_eq!(sheet.get_pixel(0, 32).0, [9, 9, 9, 255]);
    }

    #[test]
    fn sheet_skips_missing_sprites() {
        let block = single_pixel_block([9, 9, 9]);
        let block = Some(block.as_slice());
        let spr = Spr::open_from_bytes(build_archive(&[None, block, None, block])).unwrap();

        let sheet = spr
            .compose_sheet(2, Some(0), &DecodeOptions::default())
            .unwrap();

        assert_eq!(sheet.dimensions(), (64, 64));
        assert_eq!(sheet.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(sheet.get_pixel(32, 0).0, [9, 9, 9, 255]);
        assert_eq!(sheet.get_pixel(0, 32).0, [0, 0, 0, 0]);
        assert_eq!(sheet.get_pixel(32, 32).0, [9, 9, 9, 255]);
    }

    #[test]
    fn sheet_rejects_zero_width() {
        let spr = Spr::open_from_bytes(build_archive(&[])).unwrap();

        let res = spr.compose_sheet(0, None, &DecodeOptions::default());

        assert!(matches!(
            res,
            Err(SprError::InvalidSheetLayout { sprites_per_row: 0 })
        ));
    }

    #[test]
    fn sheet_rejects_overflowing_width() {
        let block = single_pixel_block([9, 9, 9]);
        let spr = Spr::open_from_bytes(build_archive(&[Some(block.as_slice())])).unwrap();

        // 2^27 * 32 does not fit in u32
        let res = spr.compose_sheet(1 << 27, None, &DecodeOptions::default());

        assert!(matches!(
            res,
            Err(SprError::InvalidSheetLayout {
                sprites_per_row: 134217728
            })
        ));

        assert!(matches!(
            spr.compose_sheet(usize::MAX, None, &DecodeOptions::default()),
            Err(SprError::InvalidSheetLayout { .. })
        ));
    }

    #[test]
    fn rgba8_conversion() {
        let block = single_pixel_block([7, 8, 9]);
        let image = decode_sprite(&block).to_rgba8();

        assert_eq!(image.dimensions(), (32, 32));
        assert_eq!(image.get_pixel(0, 0).0, [7, 8, 9, 255]);

        let back = SpriteImage::from_rgba8(&image).unwrap();
        assert_eq!(back, decode_sprite(&block));

        let wrong = RgbaImage::new(16, 32);
        assert!(matches!(
            SpriteImage::from_rgba8(&wrong),
            Err(SprError::InvalidSpriteSize {
                width: 16,
                height: 32
            })
        ));
    }
}
