use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{le_u16, le_u32},
    IResult as _IResult, Parser,
};

use crate::{
    error::SprError, Rgb, SprHeader, SpriteImage, HEADER_SIZE, SPRITE_PIXELS, TRANSPARENT_PIXEL,
};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

const COLOR_KEY_SIZE: usize = 3;
const DECLARED_SIZE_SIZE: usize = 2;

pub fn parse_header(i: &'_ [u8]) -> IResult<'_, SprHeader> {
    map((le_u32, le_u16), |(signature, sprite_count)| SprHeader {
        signature,
        sprite_count,
    })
    .parse(i)
}

pub fn parse_offsets(i: &'_ [u8], sprite_count: usize) -> IResult<'_, Vec<u32>> {
    count(le_u32, sprite_count).parse(i)
}

/// Parses the header and the offset table.
///
/// Returned offsets are 1-based with a 0 at index 0.
pub fn parse_tables(bytes: &[u8]) -> Result<(SprHeader, Vec<u32>), SprError> {
    let truncated_header = SprError::TruncatedHeader {
        length: bytes.len(),
    };

    if bytes.len() < HEADER_SIZE {
        return Err(truncated_header);
    }

    let (i, header) = parse_header(bytes).map_err(|_| truncated_header)?;

    let table_size = header.sprite_count as usize * 4;

    if i.len() < table_size {
        return Err(SprError::TruncatedOffsetTable {
            sprite_count: header.sprite_count,
            expect: table_size,
            have: i.len(),
        });
    }

    let (_, offsets) = parse_offsets(i, header.sprite_count as usize).map_err(|_| {
        SprError::TruncatedOffsetTable {
            sprite_count: header.sprite_count,
            expect: table_size,
            have: i.len(),
        }
    })?;

    let offsets = std::iter::once(0).chain(offsets).collect::<Vec<u32>>();

    Ok((header, offsets))
}

fn run_length(i: &'_ [u8]) -> IResult<'_, u16> {
    le_u16(i)
}

fn rgb(i: &'_ [u8]) -> IResult<'_, Rgb> {
    map(take(3usize), |arr: &[u8]| [arr[0], arr[1], arr[2]]).parse(i)
}

/// Decodes one compressed block into a 32x32 image.
///
/// Never fails. Whatever the stream cannot fill stays transparent and anything past
/// 1024 pixels is dropped.
pub fn decode_sprite(block: &[u8]) -> SpriteImage {
    // The declared size is only present on blocks longer than 5 bytes. It is not trusted.
    let stream_start = if block.len() > COLOR_KEY_SIZE + DECLARED_SIZE_SIZE {
        COLOR_KEY_SIZE + DECLARED_SIZE_SIZE
    } else {
        COLOR_KEY_SIZE
    };

    let mut i = block.get(stream_start..).unwrap_or_default();
    let mut pixels = Vec::with_capacity(SPRITE_PIXELS);

    while pixels.len() < SPRITE_PIXELS {
        let Ok((rest, transparent)) = run_length(i) else {
            break;
        };
        i = rest;

        let transparent = (transparent as usize).min(SPRITE_PIXELS - pixels.len());
        pixels.resize(pixels.len() + transparent, TRANSPARENT_PIXEL);

        let Ok((rest, colored)) = run_length(i) else {
            break;
        };
        i = rest;

        for _ in 0..colored {
            if pixels.len() >= SPRITE_PIXELS {
                break;
            }

            // malformed tail, keep what we have
            let Ok((rest, [r, g, b])) = rgb(i) else {
                break;
            };
            i = rest;

            pixels.push([r, g, b, 255]);
        }
    }

    pixels.resize(SPRITE_PIXELS, TRANSPARENT_PIXEL);

    SpriteImage(pixels)
}
