//! Tile storage.
//!
//! The store only performs raw array edits. Anything that shifts tile
//! indices (insert, delete, move, shrink) has to be paired with a remap of
//! the supertile cells, which is why those operations are driven from
//! [`crate::Project`] rather than called directly.

use crate::error::{check_index, Result, TileforgeError};
use crate::types::{Tile, Transform};

/// Maximum number of tiles in a tileset.
pub const MAX_TILES: usize = 256;

/// The tileset: between 1 and 256 tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileStore {
    tiles: Vec<Tile>,
}

impl Default for TileStore {
    fn default() -> Self {
        Self {
            tiles: vec![Tile::blank()],
        }
    }
}

impl TileStore {
    /// A store holding a single blank tile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from decoded tiles.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self> {
        check_count(tiles.len())?;
        Ok(Self { tiles })
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// A copy of one tile.
    pub fn get(&self, index: usize) -> Result<Tile> {
        check_index("tile", index, self.len())?;
        Ok(self.tiles[index])
    }

    /// All tiles.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Write one pixel. Returns whether the tile changed.
    pub fn set_pixel(&mut self, index: usize, row: usize, col: usize, value: bool) -> Result<bool> {
        self.tile_mut(index)?.set_pixel(row, col, value)
    }

    /// Set one row's colours. Returns whether the tile changed.
    pub fn set_row_colours(&mut self, index: usize, row: usize, fg: u8, bg: u8) -> Result<bool> {
        self.tile_mut(index)?.set_row_colours(row, fg, bg)
    }

    /// Replace a whole tile. Returns whether the tile changed.
    pub fn set(&mut self, index: usize, tile: Tile) -> Result<bool> {
        let slot = self.tile_mut(index)?;
        if *slot == tile {
            return Ok(false);
        }
        *slot = tile;
        Ok(true)
    }

    /// Apply a pattern transform. Returns whether the tile changed.
    pub fn transform(&mut self, index: usize, transform: Transform) -> Result<bool> {
        let tile = self.tile_mut(index)?;
        let before = *tile;
        transform.apply_to_tile(tile);
        Ok(*tile != before)
    }

    /// Check that a blank tile could be inserted at `at`.
    pub(crate) fn check_insert(&self, at: usize) -> Result<()> {
        check_index("tile insert position", at, self.len() + 1)?;
        if self.len() >= MAX_TILES {
            return Err(TileforgeError::CapacityExceeded {
                what: "tileset",
                limit: MAX_TILES,
            });
        }
        Ok(())
    }

    /// Check that tile `at` could be deleted.
    pub(crate) fn check_delete(&self, at: usize) -> Result<()> {
        check_index("tile", at, self.len())?;
        if self.len() == 1 {
            return Err(TileforgeError::LastEntity { what: "tile" });
        }
        Ok(())
    }

    /// Check that `source` could be moved to insertion point `target`.
    pub(crate) fn check_move(&self, source: usize, target: usize) -> Result<()> {
        check_index("tile", source, self.len())?;
        check_index("tile move target", target, self.len() + 1)
    }

    pub(crate) fn insert_raw(&mut self, at: usize, tile: Tile) -> Result<()> {
        self.check_insert(at)?;
        self.tiles.insert(at, tile);
        Ok(())
    }

    pub(crate) fn remove_raw(&mut self, at: usize) -> Result<Tile> {
        self.check_delete(at)?;
        Ok(self.tiles.remove(at))
    }

    pub(crate) fn move_raw(&mut self, source: usize, destination: usize) -> Result<()> {
        check_index("tile", source, self.len())?;
        check_index("tile", destination, self.len())?;
        let tile = self.tiles.remove(source);
        self.tiles.insert(destination, tile);
        Ok(())
    }

    /// Grow with blank tiles or truncate. Truncation does not touch supertile
    /// references; callers remap first.
    pub(crate) fn resize_raw(&mut self, new_count: usize) -> Result<()> {
        check_count(new_count)?;
        self.tiles.resize(new_count, Tile::blank());
        Ok(())
    }

    fn tile_mut(&mut self, index: usize) -> Result<&mut Tile> {
        check_index("tile", index, self.len())?;
        Ok(&mut self.tiles[index])
    }
}

/// Validate a tile count against `1..=256`.
pub(crate) fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(TileforgeError::LastEntity { what: "tile" });
    }
    if count > MAX_TILES {
        return Err(TileforgeError::CapacityExceeded {
            what: "tileset",
            limit: MAX_TILES,
        });
    }
    Ok(())
}
