use byte_writer::ByteWriter;
use rayon::prelude::*;

use crate::{error::SprError, palette::TRANSPARENT_SENTINEL, SpriteImage, HEADER_SIZE};

trait WriteToWriter {
    fn write_to_bytes(&self, writer: &mut ByteWriter);
}

/// Run-length encodes one sprite into a block.
///
/// Any pixel with non-zero alpha is written as opaque. Alpha-0 pixels are written as a run
/// length only, so they decode as [`TRANSPARENT_PIXEL`](crate::TRANSPARENT_PIXEL) whatever
/// their RGB was. The runs always add up to the full 1024 pixels, trailing transparency included.
pub fn encode_sprite(image: &SpriteImage) -> Vec<u8> {
    let mut writer = ByteWriter::new();

    writer.append_u8_slice(&TRANSPARENT_SENTINEL);

    let size_offset = writer.get_offset();
    writer.append_u16(0);

    image.write_to_bytes(&mut writer);

    let stream_size = writer.get_offset() - size_offset - 2;
    writer.replace_with_u16(size_offset, stream_size as u16);

    writer.data
}

impl WriteToWriter for SpriteImage {
    fn write_to_bytes(&self, writer: &mut ByteWriter) {
        let pixels = self.pixels();
        let mut cursor = 0;

        while cursor < pixels.len() {
            let transparent = pixels[cursor..]
                .iter()
                .take_while(|pixel| pixel[3] == 0)
                .count();
            cursor += transparent;

            let colored = pixels[cursor..]
                .iter()
                .take_while(|pixel| pixel[3] != 0)
                .count();

            writer.append_u16(transparent as u16);
            writer.append_u16(colored as u16);

            pixels[cursor..cursor + colored]
                .iter()
                .for_each(|pixel| writer.append_u8_slice(&pixel[..3]));

            cursor += colored;
        }
    }
}

/// Builds a `.spr` archive. Sprite ids follow the order of `sprites`, starting at 1.
pub struct SprWriter {
    pub signature: u32,
    /// `None` is written as an empty sprite (offset 0).
    pub sprites: Vec<Option<SpriteImage>>,
}

impl SprWriter {
    pub fn new(signature: u32) -> Self {
        Self {
            signature,
            sprites: vec![],
        }
    }

    pub fn push(&mut self, sprite: Option<SpriteImage>) -> &mut Self {
        self.sprites.push(sprite);

        self
    }

    /// Puts a sprite at a 1-based id, growing the archive with empty sprites if needed.
    pub fn set(&mut self, sprite_id: usize, sprite: SpriteImage) -> Result<&mut Self, SprError> {
        if sprite_id < 1 {
            return Err(SprError::InvalidSpriteId { sprite_id });
        }

        if sprite_id > u16::MAX as usize {
            return Err(SprError::TooManySprites { have: sprite_id });
        }

        if self.sprites.len() < sprite_id {
            self.sprites.resize(sprite_id, None);
        }

        self.sprites[sprite_id - 1] = Some(sprite);

        Ok(self)
    }

    pub fn write_to_bytes(&self) -> Result<Vec<u8>, SprError> {
        let sprite_count = u16::try_from(self.sprites.len()).map_err(|_| {
            SprError::TooManySprites {
                have: self.sprites.len(),
            }
        })?;

        let blocks = self
            .sprites
            .par_iter()
            .map(|sprite| sprite.as_ref().map(encode_sprite))
            .collect::<Vec<_>>();

        let blocks_size = blocks.iter().flatten().map(|block| block.len()).sum::<usize>();
        let mut writer = ByteWriter::with_capacity(HEADER_SIZE + blocks.len() * 4 + blocks_size);

        writer.append_u32(self.signature);
        writer.append_u16(sprite_count);

        let table_offset = writer.get_offset();
        blocks.iter().for_each(|_| writer.append_u32(0));

        blocks.iter().enumerate().for_each(|(index, block)| {
            let Some(block) = block else {
                return;
            };

            let block_offset = writer.get_offset() as u32;
            writer.replace_with_u32(table_offset + index * 4, block_offset);
            writer.append_u8_slice(block);
        });

        Ok(writer.data)
    }
}
