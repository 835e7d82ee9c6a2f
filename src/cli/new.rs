//! New command implementation.
//!
//! Writes the four files of a default project: the standard palette, one
//! blank tile, one empty supertile and a map of the configured size.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Config;
use crate::error::{Result, TileforgeError};
use crate::output::{display_path, Printer};
use crate::project::{save_project, Project, ProjectPaths};

/// Create a new project with default contents
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Base path for the project files (extension optional)
    #[arg(required = true)]
    pub base: PathBuf,

    /// Map width in supertiles
    #[arg(long)]
    pub width: Option<usize>,

    /// Map height in supertiles
    #[arg(long)]
    pub height: Option<usize>,

    /// Overwrite existing project files
    #[arg(long)]
    pub force: bool,

    /// Settings file (default: tileforge.yaml in the target directory)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: NewArgs, printer: &Printer) -> Result<()> {
    let paths = ProjectPaths::resolve(&args.base);
    let dir = match paths.base().parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let config = Config::discover(args.config.as_deref(), &dir)?;

    if !args.force {
        if let Some((_, existing)) = paths.all().into_iter().find(|(_, p)| p.exists()) {
            return Err(TileforgeError::AlreadyExists { path: existing });
        }
    }

    ensure_dir(&dir)?;

    let width = args.width.unwrap_or(config.map_width);
    let height = args.height.unwrap_or(config.map_height);
    let mut project = Project::with_map_size(width, height)?;
    save_project(&mut project, paths.base())?;

    printer.success(
        "Created",
        &format!("{} ({}x{} map)", display_path(paths.base()), width, height),
    );
    Ok(())
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| TileforgeError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create directory: {}", e),
    })
}
