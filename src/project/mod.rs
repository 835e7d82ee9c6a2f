//! The project: palette, tiles, supertiles and map, plus their render cache.
//!
//! [`Project`] is the single owner of every store. All edits go through it so
//! that each committed change is paired with the matching reference remap and
//! cache invalidation:
//!
//! | change                              | remap                    | cache                   |
//! |-------------------------------------|--------------------------|-------------------------|
//! | palette slot                        | none                     | `clear_all`             |
//! | tile pixel / colours / transform    | none                     | `invalidate_tile`       |
//! | supertile cell / transform          | none                     | `invalidate_supertile`  |
//! | tile insert / delete / move / resize| supertile cells          | `clear_all`             |
//! | supertile insert / delete / move / resize | map cells          | `clear_all`             |
//! | map cell / resize                   | none                     | none                    |
//!
//! Every operation validates all of its inputs before touching any store.

pub mod io;
pub mod paths;
pub mod scanner;

use std::rc::Rc;

use crate::error::{check_index, Result};
use crate::integrity;
use crate::render::{
    CacheStats, MapMetadata, MapRenderer, Raster, RenderCache, RenderSources, SheetKind, SheetMeta,
    SheetRenderer,
};
use crate::store::{supertiles, tiles, MapGrid, SupertileStore, TileStore};
use crate::types::{Palette, Rgb7, Supertile, Tile, Transform};
use crate::validation::{self, Diagnostics};

pub use io::{open_project, save_project};
pub use paths::{Component, ProjectPaths};
pub use scanner::{scan_projects, FoundProject};

/// Copied entities waiting to be pasted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Clipboard {
    tile: Option<Tile>,
    supertile: Option<Supertile>,
}

/// An open project.
#[derive(Debug, Default)]
pub struct Project {
    palette: Palette,
    tiles: TileStore,
    supertiles: SupertileStore,
    map: MapGrid,
    cache: RenderCache,
    clipboard: Clipboard,
    modified: bool,
}

impl Project {
    /// A new project: default palette, one blank tile, one empty supertile
    /// and a 32x24 map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new project with a map of the given size.
    pub fn with_map_size(width: usize, height: usize) -> Result<Self> {
        Ok(Self {
            map: MapGrid::new(width, height)?,
            ..Self::default()
        })
    }

    /// Assemble a project from independently decoded stores.
    ///
    /// Supertile cells naming a missing tile and map cells naming a missing
    /// supertile are reset to 0, with a warning for each.
    pub fn from_parts(
        palette: Palette,
        tiles: TileStore,
        mut supertiles: SupertileStore,
        mut map: MapGrid,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        validation::clamp_supertile_refs(&mut supertiles, tiles.len(), diagnostics);
        validation::clamp_map_refs(&mut map, supertiles.len(), diagnostics);
        Self {
            palette,
            tiles,
            supertiles,
            map,
            ..Self::default()
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn tiles(&self) -> &TileStore {
        &self.tiles
    }

    pub fn supertiles(&self) -> &SupertileStore {
        &self.supertiles
    }

    pub fn map(&self) -> &MapGrid {
        &self.map
    }

    /// Whether anything changed since the project was created, opened or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Clear the modified flag.
    pub fn mark_saved(&mut self) {
        self.modified = false;
    }

    fn touch(&mut self, changed: bool) -> bool {
        self.modified |= changed;
        changed
    }

    // --- rendering ---

    /// The cache alongside a read view of the stores it renders from.
    fn split_cache(&mut self) -> (&mut RenderCache, RenderSources<'_>) {
        let sources = RenderSources {
            palette: &self.palette,
            tiles: &self.tiles,
            supertiles: &self.supertiles,
        };
        (&mut self.cache, sources)
    }

    /// Cached raster of one tile. Out-of-range indices give a placeholder.
    pub fn render_tile(&mut self, index: usize, size: u32) -> Rc<Raster> {
        let (cache, sources) = self.split_cache();
        cache.render_tile(sources, index, size)
    }

    /// Cached raster of one supertile. Out-of-range indices give a placeholder.
    pub fn render_supertile(&mut self, index: usize, size: u32) -> Rc<Raster> {
        let (cache, sources) = self.split_cache();
        cache.render_supertile(sources, index, size)
    }

    /// Compose the whole map with `tile_size` pixels per tile.
    pub fn render_map(&mut self, tile_size: u32) -> (Raster, MapMetadata) {
        let map = &self.map;
        let cache = &mut self.cache;
        let sources = RenderSources {
            palette: &self.palette,
            tiles: &self.tiles,
            supertiles: &self.supertiles,
        };
        MapRenderer::new(cache, tile_size).render(sources, map)
    }

    /// Lay out every tile or supertile on a sheet.
    pub fn render_sheet(&mut self, kind: SheetKind, cell: u32, columns: usize) -> (Raster, SheetMeta) {
        let (cache, sources) = self.split_cache();
        SheetRenderer::new(cache, cell, columns).render(sources, kind)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    // --- palette ---

    /// Set one palette slot. Returns whether it changed.
    pub fn set_palette_colour(&mut self, slot: usize, colour: Rgb7) -> Result<bool> {
        let changed = self.palette.set(slot, colour)?;
        if changed {
            self.cache.clear_all();
        }
        Ok(self.touch(changed))
    }

    /// Replace the whole palette. Returns whether it changed.
    pub fn replace_palette(&mut self, palette: Palette) -> bool {
        let changed = self.palette != palette;
        if changed {
            self.palette = palette;
            self.cache.clear_all();
        }
        self.touch(changed)
    }

    // --- tile edits ---

    fn tile_edited(&mut self, index: usize, changed: bool) -> bool {
        if changed {
            self.cache.invalidate_tile(index, &self.supertiles);
        }
        self.touch(changed)
    }

    pub fn set_tile_pixel(&mut self, index: usize, row: usize, col: usize, value: bool) -> Result<bool> {
        let changed = self.tiles.set_pixel(index, row, col, value)?;
        Ok(self.tile_edited(index, changed))
    }

    pub fn set_tile_row_colours(&mut self, index: usize, row: usize, fg: u8, bg: u8) -> Result<bool> {
        let changed = self.tiles.set_row_colours(index, row, fg, bg)?;
        Ok(self.tile_edited(index, changed))
    }

    pub fn transform_tile(&mut self, index: usize, transform: Transform) -> Result<bool> {
        let changed = self.tiles.transform(index, transform)?;
        Ok(self.tile_edited(index, changed))
    }

    /// Replace a tile wholesale.
    pub fn set_tile(&mut self, index: usize, tile: Tile) -> Result<bool> {
        let changed = self.tiles.set(index, tile)?;
        Ok(self.tile_edited(index, changed))
    }

    /// Blank pattern, default row colours.
    pub fn clear_tile(&mut self, index: usize) -> Result<bool> {
        self.set_tile(index, Tile::blank())
    }

    // --- tile structure ---

    /// Insert a blank tile before `at` (`at == len` appends).
    pub fn insert_tile(&mut self, at: usize) -> Result<()> {
        self.tiles.check_insert(at)?;
        let remapped = integrity::remap_on_insert(self.supertiles.cells_mut(), at);
        self.tiles.insert_raw(at, Tile::blank())?;
        self.structure_changed();
        log::debug!("inserted tile at {} ({} supertile cells remapped)", at, remapped);
        Ok(())
    }

    /// Append a blank tile and return its index.
    pub fn add_tile(&mut self) -> Result<usize> {
        let at = self.tiles.len();
        self.insert_tile(at)?;
        Ok(at)
    }

    /// Delete tile `at`. Supertile cells that used it fall back to tile 0.
    pub fn delete_tile(&mut self, at: usize) -> Result<Tile> {
        self.tiles.check_delete(at)?;
        let remapped = integrity::remap_on_delete(self.supertiles.cells_mut(), at);
        let tile = self.tiles.remove_raw(at)?;
        self.structure_changed();
        log::debug!("deleted tile {} ({} supertile cells remapped)", at, remapped);
        Ok(tile)
    }

    /// Move tile `source` before position `target` (`0..=len`). Returns the
    /// tile's new index.
    pub fn move_tile(&mut self, source: usize, target: usize) -> Result<usize> {
        self.tiles.check_move(source, target)?;
        let destination = integrity::move_destination(source, target);
        if destination == source {
            return Ok(source);
        }
        let remapped = integrity::reposition(self.supertiles.cells_mut(), source, target);
        self.tiles.move_raw(source, destination)?;
        self.structure_changed();
        log::debug!("moved tile {} to {} ({} supertile cells remapped)", source, destination, remapped);
        Ok(destination)
    }

    /// Grow with blank tiles or shrink from the end. References to removed
    /// tiles fall back to tile 0 before storage is truncated.
    pub fn resize_tiles(&mut self, new_count: usize) -> Result<bool> {
        tiles::check_count(new_count)?;
        let old_count = self.tiles.len();
        if new_count == old_count {
            return Ok(false);
        }
        for removed in (new_count..old_count).rev() {
            integrity::remap_on_delete(self.supertiles.cells_mut(), removed);
        }
        self.tiles.resize_raw(new_count)?;
        self.structure_changed();
        log::debug!("resized tileset {} -> {}", old_count, new_count);
        Ok(true)
    }

    // --- supertile edits ---

    fn supertile_edited(&mut self, index: usize, changed: bool) -> bool {
        if changed {
            self.cache.invalidate_supertile(index);
        }
        self.touch(changed)
    }

    /// Put `tile` into one supertile cell. The tile must exist.
    pub fn place_tile(&mut self, supertile: usize, row: usize, col: usize, tile: usize) -> Result<bool> {
        let changed = self
            .supertiles
            .place_tile(supertile, row, col, tile, self.tiles.len())?;
        Ok(self.supertile_edited(supertile, changed))
    }

    pub fn transform_supertile(&mut self, index: usize, transform: Transform) -> Result<bool> {
        let changed = self.supertiles.transform(index, transform)?;
        Ok(self.supertile_edited(index, changed))
    }

    /// Replace a supertile wholesale. Every cell must name an existing tile.
    pub fn set_supertile(&mut self, index: usize, supertile: Supertile) -> Result<bool> {
        let changed = self.supertiles.set(index, supertile, self.tiles.len())?;
        Ok(self.supertile_edited(index, changed))
    }

    /// Point every cell at tile 0.
    pub fn clear_supertile(&mut self, index: usize) -> Result<bool> {
        self.set_supertile(index, Supertile::blank())
    }

    // --- supertile structure ---

    /// Insert an empty supertile before `at` (`at == len` appends).
    pub fn insert_supertile(&mut self, at: usize) -> Result<()> {
        self.supertiles.check_insert(at)?;
        let remapped = integrity::remap_on_insert(self.map.cells_mut(), at);
        self.supertiles.insert_raw(at, Supertile::blank())?;
        self.structure_changed();
        log::debug!("inserted supertile at {} ({} map cells remapped)", at, remapped);
        Ok(())
    }

    /// Append an empty supertile and return its index.
    pub fn add_supertile(&mut self) -> Result<usize> {
        let at = self.supertiles.len();
        self.insert_supertile(at)?;
        Ok(at)
    }

    /// Delete supertile `at`. Map cells that used it fall back to supertile 0.
    pub fn delete_supertile(&mut self, at: usize) -> Result<Supertile> {
        self.supertiles.check_delete(at)?;
        let remapped = integrity::remap_on_delete(self.map.cells_mut(), at);
        let supertile = self.supertiles.remove_raw(at)?;
        self.structure_changed();
        log::debug!("deleted supertile {} ({} map cells remapped)", at, remapped);
        Ok(supertile)
    }

    /// Move supertile `source` before position `target` (`0..=len`). Returns
    /// its new index.
    pub fn move_supertile(&mut self, source: usize, target: usize) -> Result<usize> {
        self.supertiles.check_move(source, target)?;
        let destination = integrity::move_destination(source, target);
        if destination == source {
            return Ok(source);
        }
        let remapped = integrity::reposition(self.map.cells_mut(), source, target);
        self.supertiles.move_raw(source, destination)?;
        self.structure_changed();
        log::debug!("moved supertile {} to {} ({} map cells remapped)", source, destination, remapped);
        Ok(destination)
    }

    /// Grow with empty supertiles or shrink from the end. Map references to
    /// removed supertiles fall back to supertile 0 first.
    pub fn resize_supertiles(&mut self, new_count: usize) -> Result<bool> {
        supertiles::check_count(new_count)?;
        let old_count = self.supertiles.len();
        if new_count == old_count {
            return Ok(false);
        }
        for removed in (new_count..old_count).rev() {
            integrity::remap_on_delete(self.map.cells_mut(), removed);
        }
        self.supertiles.resize_raw(new_count)?;
        self.structure_changed();
        log::debug!("resized supertile set {} -> {}", old_count, new_count);
        Ok(true)
    }

    // --- map ---

    /// Place a supertile on the map. The supertile must exist.
    pub fn paint_map(&mut self, row: usize, col: usize, supertile: usize) -> Result<bool> {
        check_index("supertile", supertile, self.supertiles.len())?;
        let changed = self.map.set(row, col, supertile as u8)?;
        Ok(self.touch(changed))
    }

    /// Resize the map, keeping the top-left overlap.
    pub fn resize_map(&mut self, width: usize, height: usize) -> Result<bool> {
        let changed = self.map.resize(width, height)?;
        if changed {
            log::debug!("resized map to {}x{}", width, height);
        }
        Ok(self.touch(changed))
    }

    /// Point every map cell at supertile 0.
    pub fn clear_map(&mut self) -> bool {
        let changed = self.map.clear();
        self.touch(changed)
    }

    // --- usage ---

    /// Supertiles that use `tile`.
    pub fn tile_usage(&self, tile: usize) -> Vec<usize> {
        integrity::tile_usage(self.supertiles.supertiles(), tile)
            .into_iter()
            .collect()
    }

    /// Map cells `(row, col)` that use `supertile`.
    pub fn supertile_usage(&self, supertile: usize) -> Vec<(usize, usize)> {
        integrity::supertile_usage(&self.map, supertile)
    }

    // --- clipboard ---

    pub fn copy_tile(&mut self, index: usize) -> Result<()> {
        self.clipboard.tile = Some(self.tiles.get(index)?);
        Ok(())
    }

    /// Paste the copied tile over `index`. Returns false if nothing was
    /// copied or the tile already matched.
    pub fn paste_tile(&mut self, index: usize) -> Result<bool> {
        match self.clipboard.tile {
            Some(tile) => self.set_tile(index, tile),
            None => {
                check_index("tile", index, self.tiles.len())?;
                Ok(false)
            }
        }
    }

    pub fn copy_supertile(&mut self, index: usize) -> Result<()> {
        self.clipboard.supertile = Some(self.supertiles.get(index)?);
        Ok(())
    }

    /// Paste the copied supertile over `index`. Fails if the copy names a
    /// tile that no longer exists.
    pub fn paste_supertile(&mut self, index: usize) -> Result<bool> {
        match self.clipboard.supertile {
            Some(supertile) => self.set_supertile(index, supertile),
            None => {
                check_index("supertile", index, self.supertiles.len())?;
                Ok(false)
            }
        }
    }

    fn structure_changed(&mut self) {
        self.cache.clear_all();
        self.modified = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TileforgeError;
    use crate::store::MAX_TILES;
    use pretty_assertions::assert_eq;

    fn marked(row: usize) -> Tile {
        let mut tile = Tile::blank();
        tile.set_pixel(row, row, true).unwrap();
        tile
    }

    /// Three distinct tiles; supertile 0 uses 0, 1, 2 with tile 1 twice.
    fn three_tile_project() -> Project {
        let mut project = Project::new();
        project.set_tile(0, marked(0)).unwrap();
        project.add_tile().unwrap();
        project.add_tile().unwrap();
        project.set_tile(1, marked(1)).unwrap();
        project.set_tile(2, marked(2)).unwrap();
        project.place_tile(0, 0, 0, 1).unwrap();
        project.place_tile(0, 3, 3, 1).unwrap();
        project.place_tile(0, 1, 2, 2).unwrap();
        project.place_tile(0, 2, 0, 2).unwrap();
        project
    }

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new();
        assert_eq!(project.tiles().len(), 1);
        assert_eq!(project.supertiles().len(), 1);
        assert_eq!(project.map().size(), (32, 24));
        assert!(!project.is_modified());
    }

    #[test]
    fn test_delete_tile_remaps_supertiles() {
        let mut project = three_tile_project();
        project.delete_tile(1).unwrap();

        assert_eq!(project.tiles().len(), 2);
        let st = project.supertiles().get(0).unwrap();
        assert_eq!(st.get(0, 0).unwrap(), 0);
        assert_eq!(st.get(3, 3).unwrap(), 0);
        assert_eq!(st.get(1, 2).unwrap(), 1);
        assert_eq!(st.get(2, 0).unwrap(), 1);
        assert_eq!(project.tiles().get(1).unwrap(), marked(2));
    }

    #[test]
    fn test_insert_then_delete_is_identity() {
        let mut project = three_tile_project();
        let tiles_before = project.tiles().clone();
        let supertiles_before = project.supertiles().clone();

        for at in 0..=3 {
            project.insert_tile(at).unwrap();
            assert!(project.tiles().get(at).unwrap().is_blank());
            project.delete_tile(at).unwrap();
            assert_eq!(project.tiles(), &tiles_before);
            assert_eq!(project.supertiles(), &supertiles_before);
        }
    }

    #[test]
    fn test_insert_shifts_references() {
        let mut project = three_tile_project();
        project.insert_tile(1).unwrap();
        let st = project.supertiles().get(0).unwrap();
        assert_eq!(st.get(0, 0).unwrap(), 2);
        assert_eq!(st.get(1, 2).unwrap(), 3);
        assert_eq!(st.get(0, 1).unwrap(), 0);
    }

    #[test]
    fn test_move_tile_keeps_references_pointing_at_same_tile() {
        let mut project = three_tile_project();
        let destination = project.move_tile(0, 3).unwrap();
        assert_eq!(destination, 2);
        assert_eq!(project.tiles().len(), 3);
        assert_eq!(project.tiles().get(2).unwrap(), marked(0));

        // every cell still resolves to the same tile content
        let st = project.supertiles().get(0).unwrap();
        assert_eq!(project.tiles().get(st.get(0, 0).unwrap() as usize).unwrap(), marked(1));
        assert_eq!(project.tiles().get(st.get(1, 2).unwrap() as usize).unwrap(), marked(2));
        assert_eq!(project.tiles().get(st.get(0, 1).unwrap() as usize).unwrap(), marked(0));
    }

    #[test]
    fn test_move_noop() {
        let mut project = three_tile_project();
        project.mark_saved();
        assert_eq!(project.move_tile(1, 2).unwrap(), 1);
        assert!(!project.is_modified());
        assert!(project.move_tile(3, 0).is_err());
        assert!(project.move_tile(0, 4).is_err());
    }

    #[test]
    fn test_insert_at_capacity_leaves_project_unchanged() {
        let mut project = Project::new();
        project.resize_tiles(MAX_TILES).unwrap();
        project.set_tile(255, marked(5)).unwrap();
        project.place_tile(0, 0, 0, 255).unwrap();

        assert!(matches!(
            project.insert_tile(0),
            Err(TileforgeError::CapacityExceeded { .. })
        ));
        assert_eq!(project.tiles().len(), MAX_TILES);
        assert_eq!(project.tiles().get(255).unwrap(), marked(5));
        assert_eq!(project.supertiles().get(0).unwrap().get(0, 0).unwrap(), 255);
    }

    #[test]
    fn test_delete_last_tile_is_rejected() {
        let mut project = Project::new();
        assert!(matches!(
            project.delete_tile(0),
            Err(TileforgeError::LastEntity { .. })
        ));
    }

    #[test]
    fn test_shrink_tiles_resets_removed_references() {
        let mut project = three_tile_project();
        project.resize_tiles(2).unwrap();
        let st = project.supertiles().get(0).unwrap();
        assert_eq!(st.get(0, 0).unwrap(), 1);
        assert_eq!(st.get(1, 2).unwrap(), 0);
        assert!(project.resize_tiles(0).is_err());
        assert!(!project.resize_tiles(2).unwrap());
    }

    #[test]
    fn test_supertile_structure_remaps_map() {
        let mut project = Project::new();
        project.add_supertile().unwrap();
        project.add_supertile().unwrap();
        project.paint_map(0, 0, 1).unwrap();
        project.paint_map(0, 1, 2).unwrap();

        project.delete_supertile(1).unwrap();
        assert_eq!(project.map().get(0, 0).unwrap(), 0);
        assert_eq!(project.map().get(0, 1).unwrap(), 1);

        project.insert_supertile(0).unwrap();
        assert_eq!(project.map().get(0, 1).unwrap(), 2);
        assert_eq!(project.map().get(1, 0).unwrap(), 1);

        project.move_supertile(2, 0).unwrap();
        assert_eq!(project.map().get(0, 1).unwrap(), 0);
        assert_eq!(project.map().get(1, 0).unwrap(), 2);

        project.resize_supertiles(1).unwrap();
        assert!(project.map().cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_place_and_paint_validate_targets() {
        let mut project = Project::new();
        assert!(project.place_tile(0, 0, 0, 1).is_err());
        assert!(project.paint_map(0, 0, 1).is_err());
        assert!(project.paint_map(24, 0, 0).is_err());
        assert!(!project.is_modified());
    }

    #[test]
    fn test_tile_edit_invalidates_dependent_renders() {
        let mut project = three_tile_project();
        project.add_supertile().unwrap();
        project.render_supertile(0, 32);
        project.render_supertile(1, 32);
        project.render_tile(2, 8);
        let before = project.cache_stats();

        assert!(project.set_tile_pixel(1, 7, 7, true).unwrap());
        project.render_supertile(0, 32);
        project.render_supertile(1, 32);
        project.render_tile(2, 8);
        let after = project.cache_stats();

        assert_eq!(after.supertile_renders, before.supertile_renders + 1);
        assert_eq!(after.tile_renders, before.tile_renders + 1);

        // unchanged edit leaves the cache alone
        assert!(!project.set_tile_pixel(1, 7, 7, true).unwrap());
        assert!(project.cache().has_supertile(0, 32));
    }

    #[test]
    fn test_palette_change_clears_cache() {
        let mut project = Project::new();
        project.render_supertile(0, 16);
        let current = project.palette().get(3).unwrap();
        assert!(!project.set_palette_colour(3, current).unwrap());
        assert!(!project.cache().is_empty());
        assert!(project.set_palette_colour(3, Rgb7::new(0, 0, 0)).unwrap());
        assert!(project.cache().is_empty());
        assert!(project.is_modified());
    }

    #[test]
    fn test_structural_change_clears_cache() {
        let mut project = Project::new();
        project.render_tile(0, 8);
        project.add_tile().unwrap();
        assert!(project.cache().is_empty());
    }

    #[test]
    fn test_clipboard() {
        let mut project = three_tile_project();
        assert!(!project.paste_tile(0).unwrap());
        project.copy_tile(2).unwrap();
        assert!(project.paste_tile(0).unwrap());
        assert_eq!(project.tiles().get(0).unwrap(), marked(2));
        assert!(project.paste_tile(9).is_err());

        project.add_supertile().unwrap();
        project.copy_supertile(0).unwrap();
        assert!(project.paste_supertile(1).unwrap());
        assert_eq!(project.supertiles().get(1).unwrap(), project.supertiles().get(0).unwrap());

        // a copied supertile naming a since-deleted tile cannot be pasted
        project.delete_tile(2).unwrap();
        project.delete_tile(1).unwrap();
        assert!(project.paste_supertile(1).is_err());
    }

    #[test]
    fn test_clear_operations() {
        let mut project = three_tile_project();
        assert!(project.clear_tile(1).unwrap());
        assert!(project.tiles().get(1).unwrap().is_blank());
        assert!(project.clear_supertile(0).unwrap());
        assert!(!project.clear_map());
        project.paint_map(1, 1, 0).unwrap();
        project.add_supertile().unwrap();
        project.paint_map(1, 1, 1).unwrap();
        assert!(project.clear_map());
    }

    #[test]
    fn test_usage_queries() {
        let mut project = three_tile_project();
        project.add_supertile().unwrap();
        project.place_tile(1, 0, 0, 2).unwrap();
        project.paint_map(2, 3, 1).unwrap();

        assert_eq!(project.tile_usage(2), vec![0, 1]);
        assert_eq!(project.tile_usage(1), vec![0]);
        assert_eq!(project.supertile_usage(1), vec![(2, 3)]);
    }

    #[test]
    fn test_from_parts_clamps_cross_references() {
        let mut st = Supertile::blank();
        st.set(0, 0, 4).unwrap();
        let supertiles = SupertileStore::from_supertiles(vec![st]).unwrap();
        let map = MapGrid::from_cells(2, 1, vec![0, 3]).unwrap();
        let mut diagnostics = Diagnostics::new();

        let project = Project::from_parts(
            Palette::default(),
            TileStore::new(),
            supertiles,
            map,
            &mut diagnostics,
        );
        assert_eq!(project.supertiles().get(0).unwrap().get(0, 0).unwrap(), 0);
        assert_eq!(project.map().cells(), &[0, 0]);
        assert_eq!(diagnostics.warning_count(), 2);
        assert!(!project.is_modified());
    }

    #[test]
    fn test_map_resize() {
        let mut project = Project::with_map_size(2, 2).unwrap();
        assert!(project.resize_map(3, 1).unwrap());
        assert_eq!(project.map().size(), (3, 1));
        assert!(project.resize_map(0, 1).is_err());
        assert!(Project::with_map_size(1025, 1).is_err());
    }
}
