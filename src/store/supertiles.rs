//! Supertile storage.
//!
//! Mirrors the tile store's lifecycle; the payload is a 4x4 tile index
//! matrix. Index-shifting operations are driven from [`crate::Project`] so
//! the map can be remapped alongside.

use crate::error::{check_index, Result, TileforgeError};
use crate::types::{Supertile, Transform};

/// Maximum number of supertiles.
pub const MAX_SUPERTILES: usize = 256;

/// Between 1 and 256 supertiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupertileStore {
    supertiles: Vec<Supertile>,
}

impl Default for SupertileStore {
    fn default() -> Self {
        Self {
            supertiles: vec![Supertile::blank()],
        }
    }
}

impl SupertileStore {
    /// A store holding one all-zero supertile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from decoded supertiles.
    pub fn from_supertiles(supertiles: Vec<Supertile>) -> Result<Self> {
        check_count(supertiles.len())?;
        Ok(Self { supertiles })
    }

    pub fn len(&self) -> usize {
        self.supertiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.supertiles.is_empty()
    }

    /// A copy of one supertile.
    pub fn get(&self, index: usize) -> Result<Supertile> {
        check_index("supertile", index, self.len())?;
        Ok(self.supertiles[index])
    }

    pub fn supertiles(&self) -> &[Supertile] {
        &self.supertiles
    }

    /// Place `tile` into one cell. `tile_count` is the current tileset size.
    /// Returns whether the cell changed.
    pub fn place_tile(
        &mut self,
        index: usize,
        row: usize,
        col: usize,
        tile: usize,
        tile_count: usize,
    ) -> Result<bool> {
        check_index("tile", tile, tile_count)?;
        let supertile = self.supertile_mut(index)?;
        supertile.set(row, col, tile as u8)
    }

    /// Replace a whole supertile. Every cell must be below `tile_count`.
    /// Returns whether anything changed.
    pub fn set(&mut self, index: usize, supertile: Supertile, tile_count: usize) -> Result<bool> {
        for tile in supertile.iter() {
            check_index("tile", tile as usize, tile_count)?;
        }
        let slot = self.supertile_mut(index)?;
        if *slot == supertile {
            return Ok(false);
        }
        *slot = supertile;
        Ok(true)
    }

    /// Permute the cell matrix. Returns whether anything changed.
    pub fn transform(&mut self, index: usize, transform: Transform) -> Result<bool> {
        let supertile = self.supertile_mut(index)?;
        let before = *supertile;
        transform.apply_to_supertile(supertile);
        Ok(*supertile != before)
    }

    pub(crate) fn supertiles_mut(&mut self) -> &mut [Supertile] {
        &mut self.supertiles
    }

    /// Every tile-index cell of every supertile, for remapping.
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        self.supertiles.iter_mut().flat_map(|st| st.iter_mut())
    }

    pub(crate) fn check_insert(&self, at: usize) -> Result<()> {
        check_index("supertile insert position", at, self.len() + 1)?;
        if self.len() >= MAX_SUPERTILES {
            return Err(TileforgeError::CapacityExceeded {
                what: "supertile set",
                limit: MAX_SUPERTILES,
            });
        }
        Ok(())
    }

    pub(crate) fn check_delete(&self, at: usize) -> Result<()> {
        check_index("supertile", at, self.len())?;
        if self.len() == 1 {
            return Err(TileforgeError::LastEntity { what: "supertile" });
        }
        Ok(())
    }

    pub(crate) fn check_move(&self, source: usize, target: usize) -> Result<()> {
        check_index("supertile", source, self.len())?;
        check_index("supertile move target", target, self.len() + 1)
    }

    pub(crate) fn insert_raw(&mut self, at: usize, supertile: Supertile) -> Result<()> {
        self.check_insert(at)?;
        self.supertiles.insert(at, supertile);
        Ok(())
    }

    pub(crate) fn remove_raw(&mut self, at: usize) -> Result<Supertile> {
        self.check_delete(at)?;
        Ok(self.supertiles.remove(at))
    }

    pub(crate) fn move_raw(&mut self, source: usize, destination: usize) -> Result<()> {
        check_index("supertile", source, self.len())?;
        check_index("supertile", destination, self.len())?;
        let supertile = self.supertiles.remove(source);
        self.supertiles.insert(destination, supertile);
        Ok(())
    }

    pub(crate) fn resize_raw(&mut self, new_count: usize) -> Result<()> {
        check_count(new_count)?;
        self.supertiles.resize(new_count, Supertile::blank());
        Ok(())
    }

    fn supertile_mut(&mut self, index: usize) -> Result<&mut Supertile> {
        check_index("supertile", index, self.len())?;
        Ok(&mut self.supertiles[index])
    }
}

/// Validate a supertile count against `1..=256`.
pub(crate) fn check_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(TileforgeError::LastEntity { what: "supertile" });
    }
    if count > MAX_SUPERTILES {
        return Err(TileforgeError::CapacityExceeded {
            what: "supertile set",
            limit: MAX_SUPERTILES,
        });
    }
    Ok(())
}
