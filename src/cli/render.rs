//! Render command implementation.
//!
//! Opens a project and writes its map, tile sheet or supertile sheet as PNG,
//! optionally with JSON metadata alongside.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};

use crate::config::Config;
use crate::error::{Result, TileforgeError};
use crate::output::{display_path, Printer};
use crate::project::{Project, ProjectPaths};
use crate::render::{write_png, write_sheet_json, SheetKind, MAX_TILE_SIZE};
use crate::types::SUPERTILE_DIM;

/// What to render.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderTarget {
    /// The whole map
    #[default]
    Map,
    /// Every tile on a grid
    Tiles,
    /// Every supertile on a grid
    Supertiles,
}

/// Render a project to PNG
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Any of the project's files, or its base path
    #[arg(required = true)]
    pub project: PathBuf,

    /// Output directory (default: from tileforge.yaml, else "dist")
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Integer upscale applied to the PNG
    #[arg(long)]
    pub scale: Option<u32>,

    /// Pixels per tile before scaling
    #[arg(long)]
    pub tile_size: Option<u32>,

    /// What to render
    #[arg(long, value_enum, default_value_t = RenderTarget::Map)]
    pub sheet: RenderTarget,

    /// Also write JSON metadata next to the PNG
    #[arg(long)]
    pub metadata: bool,

    /// Settings file (default: tileforge.yaml next to the project)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: RenderArgs, printer: &Printer) -> Result<()> {
    let paths = ProjectPaths::resolve(&args.project);
    let config = Config::discover(args.config.as_deref(), project_dir(&paths))?;

    let scale = in_range("scale", args.scale.unwrap_or(config.scale), u32::MAX)?;
    let tile_size = in_range("tile-size", args.tile_size.unwrap_or(config.tile_size), MAX_TILE_SIZE)?;
    let output = args.output.clone().unwrap_or_else(|| config.output.clone());

    let (mut project, _diagnostics) = super::open_reporting(&args.project, printer)?;

    if !output.exists() {
        fs::create_dir_all(&output).map_err(|e| TileforgeError::Io {
            path: output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let name = paths.name();
    let written = match args.sheet {
        RenderTarget::Map => render_map(&mut project, &output, &name, tile_size, scale, args.metadata)?,
        RenderTarget::Tiles => render_sheet(
            &mut project,
            SheetKind::Tiles,
            &output,
            &format!("{}.tiles", name),
            tile_size,
            config.sheet_columns,
            scale,
            args.metadata,
        )?,
        RenderTarget::Supertiles => render_sheet(
            &mut project,
            SheetKind::Supertiles,
            &output,
            &format!("{}.supertiles", name),
            tile_size * SUPERTILE_DIM as u32,
            config.supertile_columns,
            scale,
            args.metadata,
        )?,
    };

    let stats = project.cache_stats();
    log::debug!(
        "render cache: {} tile renders, {} supertile renders, {} hits",
        stats.tile_renders,
        stats.supertile_renders,
        stats.hits
    );
    printer.success("Rendered", &display_path(&written));
    Ok(())
}

fn render_map(
    project: &mut Project,
    output: &Path,
    name: &str,
    tile_size: u32,
    scale: u32,
    metadata: bool,
) -> Result<PathBuf> {
    let (raster, meta) = project.render_map(tile_size);
    let png = output.join(format!("{}.png", name));
    write_png(&raster, &png, scale)?;

    if metadata {
        let json_path = output.join(format!("{}.json", name));
        let json = serde_json::to_string_pretty(&meta).map_err(|e| TileforgeError::Render {
            message: format!("Failed to serialize map metadata: {}", e),
            help: None,
        })?;
        fs::write(&json_path, json).map_err(|e| TileforgeError::Io {
            path: json_path.clone(),
            message: format!("Failed to write map metadata: {}", e),
        })?;
    }

    Ok(png)
}

#[allow(clippy::too_many_arguments)]
fn render_sheet(
    project: &mut Project,
    kind: SheetKind,
    output: &Path,
    name: &str,
    cell: u32,
    columns: usize,
    scale: u32,
    metadata: bool,
) -> Result<PathBuf> {
    let (raster, mut meta) = project.render_sheet(kind, cell, columns);
    let png_name = format!("{}.png", name);
    let png = output.join(&png_name);
    write_png(&raster, &png, scale)?;

    if metadata {
        meta.image = png_name;
        meta.scale = scale;
        write_sheet_json(&meta, &output.join(format!("{}.json", name)))?;
    }

    Ok(png)
}

fn project_dir(paths: &ProjectPaths) -> &Path {
    match paths.base().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn in_range(flag: &str, value: u32, max: u32) -> Result<u32> {
    if value == 0 || value > max {
        return Err(TileforgeError::Config {
            message: format!("--{} {} is outside 1..={}", flag, value, max),
            help: None,
        });
    }
    Ok(value)
}
