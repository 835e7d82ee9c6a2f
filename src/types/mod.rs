//! Core value types.
//!
//! - `Colour` - 8-bit RGBA raster colours
//! - `Rgb7` / `Palette` - channel-level colours and the 16 active slots
//! - `Tile` - 8x8 pattern with per-row colour pairs
//! - `Supertile` - 4x4 tile index matrix
//! - `SlotHit` - selector position classification

mod colour;
pub mod palette;
pub mod slot;
pub mod supertile;
pub mod tile;

pub use colour::Colour;
pub use palette::{Palette, Rgb7, PALETTE_SLOTS};
pub use slot::{locate, SlotHit};
pub use supertile::{Supertile, SUPERTILE_DIM};
pub use tile::{RowColours, Tile, Transform, TILE_SIZE};
