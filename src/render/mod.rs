//! Rendering module for tileforge.
//!
//! Tiles are rasterised from their pattern, row colours and the palette;
//! supertiles are composed from tile rasters; maps and overview sheets are
//! composed from those. Everything above the tile level goes through
//! [`RenderCache`].

mod cache;
mod map;
mod png;
mod raster;
mod sheet;

/// Largest pixel edge of one tile in map and sheet renders.
pub const MAX_TILE_SIZE: u32 = 256;

pub use cache::{CacheStats, RenderCache, RenderSources};
pub use map::{MapMetadata, MapRenderer, PlacedSupertile};
pub use png::{read_png_colours, write_png};
pub use raster::{rasterize_tile, Raster};
pub use sheet::{write_sheet_json, Frame, SheetKind, SheetMeta, SheetRenderer};
