//! Validate command implementation.
//!
//! Opens each project without writing anything, reports load repairs and
//! unused entities, and fails if any project could not be opened.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, TileforgeError};
use crate::output::{display_path, Printer};
use crate::project::open_project;
use crate::validation::{check_unused, print_diagnostics, summary, Diagnostic, Diagnostics};

/// Check projects for decode errors and dangling references
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project files or base paths to validate
    #[arg(required = true)]
    pub projects: Vec<PathBuf>,

    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let mut failed = 0;

    for path in &args.projects {
        let diagnostics = validate_project(path);
        let failing = diagnostics.has_errors() || (args.strict && diagnostics.has_warnings());

        if failing {
            failed += 1;
            printer.error("Failed", &display_path(path));
        } else {
            printer.status("Checked", &display_path(path));
        }
        print_diagnostics(printer, &diagnostics);
        if !diagnostics.is_empty() {
            eprintln!("  {}", printer.dim(&summary(&diagnostics)));
        }
    }

    if failed > 0 {
        return Err(TileforgeError::ValidationFailed {
            failed,
            total: args.projects.len(),
        });
    }
    Ok(())
}

/// Everything wrong with one project. A project that cannot be opened yields
/// a single error diagnostic.
pub fn validate_project(path: &Path) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    match open_project(path, &mut diagnostics) {
        Ok(project) => check_unused(
            project.tiles().len(),
            project.supertiles(),
            project.map(),
            &mut diagnostics,
        ),
        Err(e) => {
            let code = match &e {
                TileforgeError::MissingFiles { .. } => "tileforge::project::missing",
                TileforgeError::DecodeFile { .. } | TileforgeError::Decode(_) => "tileforge::decode",
                _ => "tileforge::io",
            };
            diagnostics.push(Diagnostic::error(code, e.to_string()));
        }
    }
    diagnostics
}
