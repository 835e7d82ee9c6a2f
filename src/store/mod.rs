//! The three entity stores.
//!
//! Each store owns its entries outright and hands out copies; references
//! between stores are plain indices.

pub mod map;
pub mod supertiles;
pub mod tiles;

pub use map::{MapGrid, MAX_MAP_DIM, MIN_MAP_DIM};
pub use supertiles::{SupertileStore, MAX_SUPERTILES};
pub use tiles::{TileStore, MAX_TILES};
