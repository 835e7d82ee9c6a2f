pub mod completions;
pub mod info;
pub mod list;
pub mod new;
pub mod palette;
pub mod render;
pub mod validate;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::project::{open_project, Project};
use crate::validation::{print_diagnostics, Diagnostics};

/// tileforge - MSX tile, supertile and map project tool
#[derive(Parser, Debug)]
#[command(name = "tileforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a project's map or overview sheets to PNG
    Render(render::RenderArgs),

    /// Create a new project with default contents
    New(new::NewArgs),

    /// Show counts, dimensions and usage for a project
    Info(info::InfoArgs),

    /// Check projects for decode errors and dangling references
    Validate(validate::ValidateArgs),

    /// Print a project's palette or import one from a PNG
    Palette(palette::PaletteArgs),

    /// Find projects under a directory
    List(list::ListArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Open a project, printing a status line and any load warnings.
pub(crate) fn open_reporting(path: &Path, printer: &Printer) -> Result<(Project, Diagnostics)> {
    let mut diagnostics = Diagnostics::new();
    let project = open_project(path, &mut diagnostics)?;

    printer.status(
        "Opened",
        &format!(
            "{} ({}, {}, {}x{} map)",
            display_path(path),
            plural(project.tiles().len(), "tile", "tiles"),
            plural(project.supertiles().len(), "supertile", "supertiles"),
            project.map().width(),
            project.map().height()
        ),
    );
    print_diagnostics(printer, &diagnostics);

    Ok((project, diagnostics))
}
