//! Warning lists and post-load cross-reference checks.
//!
//! Decoding and editing never fail on a single bad payload byte; they record
//! a [`Diagnostic`] here instead. `tileforge validate` prints the list, and
//! every other command surfaces it as warnings.

mod checks;
mod warning;

pub use checks::{check_unused, clamp_map_refs, clamp_supertile_refs};
pub use warning::{Diagnostic, Diagnostics, Severity};

use crate::output::Printer;

/// Print diagnostics to stderr.
pub fn print_diagnostics(printer: &Printer, diagnostics: &Diagnostics) {
    for d in diagnostics.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {}: {}", printer.dim("help"), help);
        }
    }
}

/// One-line summary of a diagnostic list.
pub fn summary(diagnostics: &Diagnostics) -> String {
    let errors = diagnostics.error_count();
    let warnings = diagnostics.warning_count();

    if errors > 0 {
        format!("Validation failed: {} error(s), {} warning(s)", errors, warnings)
    } else if warnings > 0 {
        format!("Validation passed ({} warning(s))", warnings)
    } else {
        "Validation passed.".to_string()
    }
}
