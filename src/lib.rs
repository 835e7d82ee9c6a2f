//! tileforge - tile, supertile and map authoring core for MSX Screen 4 graphics
//!
//! A project is a 16-colour palette, up to 256 8x8 tiles, up to 256 supertiles
//! (4x4 tile matrices) and a map of supertile indices, stored as four binary
//! files. [`Project`] owns all of it and keeps cross references and the render
//! cache consistent through every edit.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod integrity;
pub mod output;
pub mod project;
pub mod render;
pub mod store;
pub mod types;
pub mod validation;

pub use config::Config;
pub use error::{DecodeError, Result, TileforgeError};
pub use project::{open_project, save_project, scan_projects, Component, FoundProject, Project, ProjectPaths};
pub use render::{CacheStats, MapMetadata, Raster, RenderCache, SheetKind, SheetMeta};
pub use store::{MapGrid, SupertileStore, TileStore, MAX_MAP_DIM, MAX_SUPERTILES, MAX_TILES};
pub use types::{Colour, Palette, Rgb7, RowColours, SlotHit, Supertile, Tile, Transform};
pub use validation::{Diagnostic, Diagnostics, Severity};
