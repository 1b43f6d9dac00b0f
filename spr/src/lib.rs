//! Legacy indexed-sprite archive (`.spr`) reading and writing.
//!
//! Layout, all little-endian:
//!
//! - `u32` signature
//! - `u16` sprite count `N`
//! - `[u32; N]` block offsets, sprite ids start at 1, 0 means empty
//! - compressed blocks: 3 byte color key, `u16` declared size, then alternating
//!   `u16` transparent run / `u16` colored run followed by RGB triples
//!
//! Every sprite is 32x32.
pub mod error;
mod palette;
mod parser;
mod types;
mod utils;
mod writer;

pub use palette::{generate_palette, TRANSPARENT_SENTINEL};
pub use parser::decode_sprite;
pub use types::*;
pub use writer::{encode_sprite, SprWriter};
