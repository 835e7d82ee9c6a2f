//! List command implementation.
//!
//! Scans a directory tree and prints every project base found, flagging the
//! ones with component files missing.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::project::{scan_projects, FoundProject};

/// Find projects under a directory
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory to scan (default: current directory)
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Maximum directory depth to descend
    #[arg(long)]
    pub depth: Option<usize>,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let found = scan_projects(&args.dir, args.depth);

    for project in &found {
        let name = display_path(project.paths.base());
        if project.is_complete() {
            printer.info("Project", &name);
        } else {
            printer.warning("Partial", &format!("{} {}", name, printer.dim(&missing_note(project))));
        }
    }

    let complete = found.iter().filter(|p| p.is_complete()).count();
    printer.status(
        "Found",
        &format!(
            "{} in {} ({} incomplete)",
            plural(complete, "project", "projects"),
            display_path(&args.dir),
            found.len() - complete
        ),
    );
    Ok(())
}

fn missing_note(project: &FoundProject) -> String {
    let missing: Vec<String> = project
        .missing()
        .iter()
        .map(|c| format!(".{}", c.extension()))
        .collect();
    format!("(missing {})", missing.join(", "))
}
