use crate::{Palette, Rgb};

/// Entry 0. Marks transparency in indexed tooling, magenta so it stands out.
pub const TRANSPARENT_SENTINEL: Rgb = [255, 0, 255];

const CUBE_STEP: u8 = 51;
const GRAYSCALE_STEPS: usize = 24;

/// Builds the 256 color legacy palette.
///
/// - 0: [`TRANSPARENT_SENTINEL`]
/// - 1..=216: 6x6x6 web-safe cube, red outermost and blue innermost
/// - 217..=240: 24 step grayscale ramp from 0 to 255
/// - the rest: black
pub fn generate_palette() -> Palette {
    let mut palette = [[0u8; 3]; 256];
    palette[0] = TRANSPARENT_SENTINEL;

    let cube = (0..6u8).flat_map(|r| {
        (0..6u8).flat_map(move |g| {
            (0..6u8).map(move |b| [r * CUBE_STEP, g * CUBE_STEP, b * CUBE_STEP])
        })
    });

    let grayscale = (0..GRAYSCALE_STEPS).map(|i| {
        let gray = (i as f32 * 255. / (GRAYSCALE_STEPS - 1) as f32).round() as u8;
        [gray, gray, gray]
    });

    palette[1..]
        .iter_mut()
        .zip(cube.chain(grayscale))
        .for_each(|(entry, color)| *entry = color);

    palette
}
