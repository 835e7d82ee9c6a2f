//! Info command implementation.
//!
//! Summarizes a project: entity counts, map size, palette, which tiles and
//! supertiles nothing refers to, and any load warnings.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{Result, TileforgeError};
use crate::output::{plural, Printer};
use crate::project::{Project, ProjectPaths};
use crate::validation::{Diagnostic, Diagnostics};

/// Show counts, dimensions and usage for a project
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Any of the project's files, or its base path
    #[arg(required = true)]
    pub project: PathBuf,

    /// Print a JSON report to stdout
    #[arg(long)]
    pub json: bool,
}

/// Project summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoReport {
    pub name: String,
    pub tiles: usize,
    pub supertiles: usize,
    pub map: [usize; 2],
    /// Display colour of each palette slot.
    pub palette: Vec<String>,
    /// Tiles used by no supertile.
    pub unused_tiles: Vec<usize>,
    /// Supertiles placed on no map cell.
    pub unused_supertiles: Vec<usize>,
    pub warnings: Vec<Diagnostic>,
}

impl InfoReport {
    pub fn new(name: String, project: &Project, diagnostics: &Diagnostics) -> Self {
        let unused_tiles = (0..project.tiles().len())
            .filter(|&t| project.tile_usage(t).is_empty())
            .collect();
        let unused_supertiles = (0..project.supertiles().len())
            .filter(|&s| project.supertile_usage(s).is_empty())
            .collect();

        Self {
            name,
            tiles: project.tiles().len(),
            supertiles: project.supertiles().len(),
            map: [project.map().width(), project.map().height()],
            palette: project
                .palette()
                .display_colours()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            unused_tiles,
            unused_supertiles,
            warnings: diagnostics.iter().cloned().collect(),
        }
    }
}

pub fn run(args: InfoArgs, printer: &Printer) -> Result<()> {
    let (project, diagnostics) = super::open_reporting(&args.project, printer)?;
    let report = InfoReport::new(ProjectPaths::resolve(&args.project).name(), &project, &diagnostics);

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| TileforgeError::Render {
            message: format!("Failed to serialize report: {}", e),
            help: None,
        })?;
        println!("{}", json);
        return Ok(());
    }

    printer.info("Tiles", &report.tiles.to_string());
    printer.info("Supertiles", &report.supertiles.to_string());
    printer.info("Map", &format!("{}x{}", report.map[0], report.map[1]));
    printer.info("Palette", &report.palette.join(" "));
    if !report.unused_tiles.is_empty() {
        printer.warning(
            "Unused",
            &format!("{}: {}", plural(report.unused_tiles.len(), "tile", "tiles"), join(&report.unused_tiles)),
        );
    }
    if !report.unused_supertiles.is_empty() {
        printer.warning(
            "Unused",
            &format!(
                "{}: {}",
                plural(report.unused_supertiles.len(), "supertile", "supertiles"),
                join(&report.unused_supertiles)
            ),
        );
    }
    Ok(())
}

fn join(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
