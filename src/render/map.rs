//! Full-map composition.
//!
//! Places a supertile raster at every map cell. Supertiles come from the
//! render cache, so a map that repeats a handful of supertiles only composes
//! each one once.

use serde::Serialize;

use crate::store::MapGrid;
use crate::types::SUPERTILE_DIM;

use super::cache::{RenderCache, RenderSources};
use super::raster::Raster;
use super::MAX_TILE_SIZE;

/// Summary of a composed map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapMetadata {
    /// Canvas size in pixels.
    pub size: [usize; 2],
    /// Grid size in supertiles.
    pub grid: [usize; 2],
    /// Pixel edge of one supertile cell.
    pub cell_size: usize,
    /// Supertile indices in first-use order with their cell positions.
    pub supertiles: Vec<PlacedSupertile>,
}

/// Where one supertile was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedSupertile {
    pub index: usize,
    /// Pixel offsets of each placement.
    pub positions: Vec<[usize; 2]>,
}

/// Composes map rasters through a render cache.
pub struct MapRenderer<'c> {
    cache: &'c mut RenderCache,
    tile_size: u32,
}

impl<'c> MapRenderer<'c> {
    /// `tile_size` is the pixel edge of one tile, clamped to
    /// `1..=MAX_TILE_SIZE`; supertiles are four times that.
    pub fn new(cache: &'c mut RenderCache, tile_size: u32) -> Self {
        Self {
            cache,
            tile_size: tile_size.clamp(1, MAX_TILE_SIZE),
        }
    }

    /// Pixel edge of one supertile cell.
    pub fn cell_size(&self) -> u32 {
        self.tile_size * SUPERTILE_DIM as u32
    }

    /// Render the whole map.
    pub fn render(&mut self, sources: RenderSources<'_>, map: &MapGrid) -> (Raster, MapMetadata) {
        let cell = self.cell_size() as usize;
        let mut canvas = Raster::transparent(map.width() * cell, map.height() * cell);
        let mut placed: Vec<PlacedSupertile> = Vec::new();

        for (row, col, index) in map.iter_cells() {
            let index = index as usize;
            let raster = self.cache.render_supertile(sources, index, self.cell_size());
            let position = [col * cell, row * cell];
            canvas.blit(&raster, position[0], position[1]);

            match placed.iter_mut().find(|p| p.index == index) {
                Some(entry) => entry.positions.push(position),
                None => placed.push(PlacedSupertile {
                    index,
                    positions: vec![position],
                }),
            }
        }

        let metadata = MapMetadata {
            size: [canvas.width(), canvas.height()],
            grid: [map.width(), map.height()],
            cell_size: cell,
            supertiles: placed,
        };
        (canvas, metadata)
    }
}
