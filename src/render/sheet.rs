//! Overview sheets.
//!
//! Lays every tile (or every supertile) out on a fixed-column grid and
//! describes where each one landed in TexturePacker-compatible JSON Hash
//! format, for game engine interop.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, TileforgeError};

use super::cache::{RenderCache, RenderSources};
use super::raster::Raster;
use super::MAX_TILE_SIZE;
use crate::types::SUPERTILE_DIM;

/// Which entities a sheet shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Tiles,
    Supertiles,
}

impl SheetKind {
    fn frame_prefix(self) -> &'static str {
        match self {
            SheetKind::Tiles => "tile",
            SheetKind::Supertiles => "supertile",
        }
    }
}

/// A frame in the sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub name: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// Sheet metadata.
#[derive(Debug, Clone)]
pub struct SheetMeta {
    pub frames: Vec<Frame>,
    pub image: String,
    pub size: (u32, u32),
    pub scale: u32,
}

/// Renders overview sheets through the render cache.
pub struct SheetRenderer<'c> {
    cache: &'c mut RenderCache,
    /// Pixel edge of one entry.
    cell: u32,
    /// Entries per row.
    columns: usize,
    /// Gap between entries, in pixels.
    pub padding: u32,
}

impl<'c> SheetRenderer<'c> {
    pub fn new(cache: &'c mut RenderCache, cell: u32, columns: usize) -> Self {
        Self {
            cache,
            cell: cell.clamp(1, MAX_TILE_SIZE * SUPERTILE_DIM as u32),
            columns: columns.max(1),
            padding: 0,
        }
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding.min(MAX_TILE_SIZE);
        self
    }

    /// Render every entry of `kind` in index order, left to right.
    pub fn render(&mut self, sources: RenderSources<'_>, kind: SheetKind) -> (Raster, SheetMeta) {
        let count = match kind {
            SheetKind::Tiles => sources.tiles.len(),
            SheetKind::Supertiles => sources.supertiles.len(),
        };

        let columns = self.columns.min(count.max(1));
        let rows = count.div_ceil(columns);
        let pitch = (self.cell + self.padding) as usize;
        let width = (columns * pitch).saturating_sub(self.padding as usize);
        let height = (rows * pitch).saturating_sub(self.padding as usize);

        let mut sheet = Raster::transparent(width, height);
        let mut frames = Vec::with_capacity(count);

        for index in 0..count {
            let raster = match kind {
                SheetKind::Tiles => self.cache.render_tile(sources, index, self.cell),
                SheetKind::Supertiles => self.cache.render_supertile(sources, index, self.cell),
            };
            let x = (index % columns) * pitch;
            let y = (index / columns) * pitch;
            sheet.blit(&raster, x, y);
            frames.push(Frame {
                name: format!("{}_{:03}", kind.frame_prefix(), index),
                x: x as u32,
                y: y as u32,
                w: self.cell,
                h: self.cell,
            });
        }

        let meta = SheetMeta {
            frames,
            image: format!("{}s.png", kind.frame_prefix()),
            size: (width as u32, height as u32),
            scale: 1,
        };
        (sheet, meta)
    }
}

/// Write sheet metadata as TexturePacker-compatible JSON Hash format.
pub fn write_sheet_json(meta: &SheetMeta, path: &Path) -> Result<()> {
    let output = TexturePackerJson::from_meta(meta);
    let json = serde_json::to_string_pretty(&output).map_err(|e| TileforgeError::Render {
        message: format!("Failed to serialize sheet metadata: {}", e),
        help: None,
    })?;
    fs::write(path, json).map_err(|e| TileforgeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })?;
    Ok(())
}

// --- TexturePacker JSON serialization types ---

#[derive(Serialize)]
struct TexturePackerJson {
    frames: BTreeMap<String, TPFrame>,
    meta: TPMeta,
}

#[derive(Serialize)]
struct TPFrame {
    frame: TPRect,
    rotated: bool,
    trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    sprite_source_size: TPRect,
    #[serde(rename = "sourceSize")]
    source_size: TPSize,
}

#[derive(Serialize)]
struct TPRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPSize {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPMeta {
    app: String,
    version: String,
    image: String,
    size: TPSize,
    scale: String,
}

impl TexturePackerJson {
    fn from_meta(meta: &SheetMeta) -> Self {
        let s = meta.scale;
        let frames = meta
            .frames
            .iter()
            .map(|f| {
                let frame = TPFrame {
                    frame: TPRect {
                        x: f.x * s,
                        y: f.y * s,
                        w: f.w * s,
                        h: f.h * s,
                    },
                    rotated: false,
                    trimmed: false,
                    sprite_source_size: TPRect {
                        x: 0,
                        y: 0,
                        w: f.w * s,
                        h: f.h * s,
                    },
                    source_size: TPSize {
                        w: f.w * s,
                        h: f.h * s,
                    },
                };
                (f.name.clone(), frame)
            })
            .collect();

        TexturePackerJson {
            frames,
            meta: TPMeta {
                app: "tileforge".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                image: meta.image.clone(),
                size: TPSize {
                    w: meta.size.0 * s,
                    h: meta.size.1 * s,
                },
                scale: meta.scale.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SupertileStore, TileStore};
    use crate::types::{Palette, Supertile, Tile};
    use tempfile::tempdir;

    struct Stores {
        palette: Palette,
        tiles: TileStore,
        supertiles: SupertileStore,
    }

    impl Stores {
        fn new(tiles: usize, supertiles: usize) -> Self {
            Self {
                palette: Palette::default(),
                tiles: TileStore::from_tiles(vec![Tile::blank(); tiles]).unwrap(),
                supertiles: SupertileStore::from_supertiles(vec![Supertile::blank(); supertiles])
                    .unwrap(),
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
    fn test_oversized_cell_is_clamped() {
        let stores = Stores::new(1, 1);
        let mut cache = RenderCache::new();
        let (sheet, meta) =
            SheetRenderer::new(&mut cache, u32::MAX, 8).render(stores.sources(), SheetKind::Supertiles);

        assert_eq!(sheet.size(), (1024, 1024));
        assert_eq!(meta.frames[0].w, MAX_TILE_SIZE * 4);
    }

    #[test]
    fn test_tile_sheet_layout() {
        let stores = Stores::new(20, 1);
        let mut cache = RenderCache::new();
        let (sheet, meta) = SheetRenderer::new(&mut cache, 8, 16).render(stores.sources(), SheetKind::Tiles);

        assert_eq!(sheet.size(), (128, 16));
        assert_eq!(meta.frames.len(), 20);
        assert_eq!(meta.frames[17].name, "tile_017");
        assert_eq!((meta.frames[17].x, meta.frames[17].y), (8, 8));
        assert_eq!(sheet.get(127, 15), Some(Default::default()));
    }

    #[test]
    fn test_narrow_sheet_shrinks_to_count() {
        let stores = Stores::new(1, 3);
        let mut cache = RenderCache::new();
        let (sheet, meta) = SheetRenderer::new(&mut cache, 16, 8)
            .with_padding(2)
            .render(stores.sources(), SheetKind::Supertiles);

        assert_eq!(sheet.size(), (52, 16));
        assert_eq!(meta.frames[2].x, 36);
        assert_eq!(meta.image, "supertiles.png");
    }

    #[test]
    fn test_write_sheet_json() {
        let stores = Stores::new(2, 1);
        let mut cache = RenderCache::new();
        let (_, mut meta) = SheetRenderer::new(&mut cache, 8, 16).render(stores.sources(), SheetKind::Tiles);
        meta.scale = 2;

        let dir = tempdir().unwrap();
        let path = dir.path().join("tiles.json");
        write_sheet_json(&meta, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["frames"]["tile_001"]["frame"]["x"], 16);
        assert_eq!(json["meta"]["size"]["w"], 32);
        assert_eq!(json["meta"]["app"], "tileforge");
    }
}
