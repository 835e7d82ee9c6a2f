//! Memoised tile and supertile rasters.
//!
//! Entries are keyed by `(index, size)`. Because indices are positions in a
//! store, anything that shifts positions (insert, delete, move, resize) or
//! recolours everything (a palette edit) must call [`RenderCache::clear_all`].
//! Direct edits use the precise invalidators; a tile edit also drops every
//! supertile raster that contains the tile.

use std::collections::HashMap;
use std::rc::Rc;

use crate::integrity::tile_usage;
use crate::store::{SupertileStore, TileStore};
use crate::types::{Colour, Palette, SUPERTILE_DIM};

use super::raster::{rasterize_tile, Raster};

/// Borrowed view of the stores a render reads from.
#[derive(Debug, Clone, Copy)]
pub struct RenderSources<'a> {
    pub palette: &'a Palette,
    pub tiles: &'a TileStore,
    pub supertiles: &'a SupertileStore,
}

/// Counters for cache behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Tile rasters computed from scratch.
    pub tile_renders: usize,
    /// Supertile rasters composed from scratch.
    pub supertile_renders: usize,
    /// Requests answered from the cache.
    pub hits: usize,
}

type Key = (usize, u32);

/// Cache of rendered tiles and supertiles.
#[derive(Debug, Default)]
pub struct RenderCache {
    tiles: HashMap<Key, Rc<Raster>>,
    supertiles: HashMap<Key, Rc<Raster>>,
    stats: CacheStats,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render tile `index` at `size` x `size`.
    ///
    /// Never fails: an index past the end of the tileset yields a flat
    /// [`Colour::INVALID_TILE`] raster, which is not cached.
    pub fn render_tile(&mut self, sources: RenderSources<'_>, index: usize, size: u32) -> Rc<Raster> {
        let Ok(tile) = sources.tiles.get(index) else {
            return Rc::new(Raster::filled(size as usize, size as usize, Colour::INVALID_TILE));
        };

        if let Some(raster) = self.tiles.get(&(index, size)) {
            self.stats.hits += 1;
            return Rc::clone(raster);
        }

        let raster = Rc::new(rasterize_tile(&tile, sources.palette, size as usize));
        self.stats.tile_renders += 1;
        self.tiles.insert((index, size), Rc::clone(&raster));
        raster
    }

    /// Render supertile `index` at `size` x `size`.
    ///
    /// The 4x4 cells are each `size / 4` pixels; when `size` is not a multiple
    /// of four the leftover edge pixels repeat the last cell's edge. A size
    /// too small to give every cell a pixel, or an index past the end of the
    /// supertile set, yields a flat [`Colour::INVALID_SUPERTILE`] raster.
    pub fn render_supertile(
        &mut self,
        sources: RenderSources<'_>,
        index: usize,
        size: u32,
    ) -> Rc<Raster> {
        let Ok(supertile) = sources.supertiles.get(index) else {
            return Rc::new(invalid_supertile(size));
        };

        if let Some(raster) = self.supertiles.get(&(index, size)) {
            self.stats.hits += 1;
            return Rc::clone(raster);
        }

        let cell = size / SUPERTILE_DIM as u32;
        let raster = if cell == 0 {
            invalid_supertile(size)
        } else {
            let size = size as usize;
            let cell_px = cell as usize;
            let mut raster = Raster::transparent(size, size);
            for (row, cells) in supertile.cells().iter().enumerate() {
                for (col, &tile) in cells.iter().enumerate() {
                    let tile_raster = self.render_tile(sources, tile as usize, cell);
                    let x0 = col * cell_px;
                    let y0 = row * cell_px;
                    let x1 = if col == SUPERTILE_DIM - 1 { size } else { x0 + cell_px };
                    let y1 = if row == SUPERTILE_DIM - 1 { size } else { y0 + cell_px };
                    for y in y0..y1 {
                        let ty = (y - y0).min(cell_px - 1);
                        for x in x0..x1 {
                            let tx = (x - x0).min(cell_px - 1);
                            if let Some(colour) = tile_raster.get(tx, ty) {
                                raster.set(x, y, colour);
                            }
                        }
                    }
                }
            }
            raster
        };

        let raster = Rc::new(raster);
        self.stats.supertile_renders += 1;
        self.supertiles.insert((index, size), Rc::clone(&raster));
        raster
    }

    /// Drop tile `index` at every size, plus every supertile that uses it.
    pub fn invalidate_tile(&mut self, index: usize, supertiles: &SupertileStore) {
        self.tiles.retain(|&(i, _), _| i != index);
        let users = tile_usage(supertiles.supertiles(), index);
        if !users.is_empty() {
            self.supertiles.retain(|(i, _), _| !users.contains(i));
        }
        log::trace!("invalidated tile {} and {} supertile(s)", index, users.len());
    }

    /// Drop supertile `index` at every size.
    pub fn invalidate_supertile(&mut self, index: usize) {
        self.supertiles.retain(|&(i, _), _| i != index);
        log::trace!("invalidated supertile {}", index);
    }

    /// Drop everything.
    pub fn clear_all(&mut self) {
        self.tiles.clear();
        self.supertiles.clear();
        log::trace!("render cache cleared");
    }

    /// Whether a tile raster is cached.
    pub fn has_tile(&self, index: usize, size: u32) -> bool {
        self.tiles.contains_key(&(index, size))
    }

    /// Whether a supertile raster is cached.
    pub fn has_supertile(&self, index: usize, size: u32) -> bool {
        self.supertiles.contains_key(&(index, size))
    }

    /// Number of cached rasters of both kinds.
    pub fn len(&self) -> usize {
        self.tiles.len() + self.supertiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

fn invalid_supertile(size: u32) -> Raster {
    Raster::filled(size as usize, size as usize, Colour::INVALID_SUPERTILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RowColours, Supertile, Tile};

    struct Fixture {
        palette: Palette,
        tiles: TileStore,
        supertiles: SupertileStore,
    }

    impl Fixture {
        /// Three tiles; supertile 0 uses tile 1, supertile 1 uses only tile 0.
        fn new() -> Self {
            let mut tiles = TileStore::from_tiles(vec![Tile::blank(); 3]).unwrap();
            tiles.set_pixel(1, 0, 0, true).unwrap();
            let mut st = Supertile::blank();
            st.set(0, 0, 1).unwrap();
            let supertiles = SupertileStore::from_supertiles(vec![st, Supertile::blank()]).unwrap();
            Self {
                palette: Palette::default(),
                tiles,
                supertiles,
            }
        }

        fn sources(&self) -> RenderSources<'_> {
            RenderSources {
                palette: &self.palette,
                tiles: &self.tiles,
                supertiles: &self.supertiles,
            }
        }
    }

    #[test]
    fn test_tile_render_is_memoised() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();

        let a = cache.render_tile(fx.sources(), 1, 8);
        let b = cache.render_tile(fx.sources(), 1, 8);
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().tile_renders, 1);
        assert_eq!(cache.stats().hits, 1);

        cache.render_tile(fx.sources(), 1, 16);
        assert_eq!(cache.stats().tile_renders, 2);
    }

    #[test]
    fn test_invalid_tile_placeholder() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        let raster = cache.render_tile(fx.sources(), 99, 8);
        assert!(raster.is_flat());
        assert_eq!(raster.get(0, 0), Some(Colour::INVALID_TILE));
        assert!(!cache.has_tile(99, 8));
    }

    #[test]
    fn test_supertile_composes_tiles() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        let raster = cache.render_supertile(fx.sources(), 0, 32);

        assert_eq!(raster.size(), (32, 32));
        let fg = fx.palette.display(RowColours::DEFAULT.fg);
        let bg = fx.palette.display(RowColours::DEFAULT.bg);
        assert_eq!(raster.get(0, 0), fg);
        assert_eq!(raster.get(1, 0), bg);
        assert_eq!(raster.get(31, 31), bg);
        assert!(cache.has_tile(1, 8));
        assert!(cache.has_tile(0, 8));
    }

    #[test]
    fn test_supertile_edge_remainder_is_filled() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        let raster = cache.render_supertile(fx.sources(), 1, 10);
        assert_eq!(raster.size(), (10, 10));
        assert!(raster.is_flat());
        assert_eq!(raster.get(9, 9), fx.palette.display(RowColours::DEFAULT.bg));
    }

    #[test]
    fn test_supertile_too_small_and_out_of_range() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        let tiny = cache.render_supertile(fx.sources(), 0, 3);
        assert_eq!(tiny.get(0, 0), Some(Colour::INVALID_SUPERTILE));

        let missing = cache.render_supertile(fx.sources(), 7, 16);
        assert!(missing.is_flat());
        assert_eq!(missing.get(15, 15), Some(Colour::INVALID_SUPERTILE));
    }

    #[test]
    fn test_invalidate_tile_is_transitive() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        cache.render_supertile(fx.sources(), 0, 32);
        cache.render_supertile(fx.sources(), 1, 32);
        cache.render_tile(fx.sources(), 1, 16);

        cache.invalidate_tile(1, &fx.supertiles);

        assert!(!cache.has_tile(1, 8));
        assert!(!cache.has_tile(1, 16));
        assert!(!cache.has_supertile(0, 32));
        assert!(cache.has_supertile(1, 32));
        assert!(cache.has_tile(0, 8));

        let before = cache.stats();
        cache.render_supertile(fx.sources(), 1, 32);
        assert_eq!(cache.stats().supertile_renders, before.supertile_renders);
        cache.render_supertile(fx.sources(), 0, 32);
        assert_eq!(cache.stats().supertile_renders, before.supertile_renders + 1);
        assert_eq!(cache.stats().tile_renders, before.tile_renders + 1);
    }

    #[test]
    fn test_invalidate_supertile_and_clear_all() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        cache.render_supertile(fx.sources(), 0, 16);
        cache.render_supertile(fx.sources(), 1, 16);

        cache.invalidate_supertile(0);
        assert!(!cache.has_supertile(0, 16));
        assert!(cache.has_supertile(1, 16));
        assert!(cache.has_tile(1, 4));

        cache.clear_all();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_held_raster_survives_invalidation() {
        let fx = Fixture::new();
        let mut cache = RenderCache::new();
        let held = cache.render_tile(fx.sources(), 0, 8);
        cache.clear_all();
        assert_eq!(held.size(), (8, 8));
    }
}
