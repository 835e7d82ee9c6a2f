use miette::Diagnostic;
use thiserror::Error;

/// Structural problems found while decoding a binary asset file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("bad header: {message}")]
    BadHeader { message: String },

    #[error("unexpected end of data while reading {context} (needed {needed} bytes, {available} available)")]
    UnexpectedEof {
        context: String,
        needed: usize,
        available: usize,
    },

    #[error("{what} {value} is outside {min}..={max}")]
    CountOutOfBounds {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },
}

/// Main error type for tileforge operations
#[derive(Error, Diagnostic, Debug)]
pub enum TileforgeError {
    #[error("IO error: {0}")]
    #[diagnostic(code(tileforge::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(tileforge::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("{what} index {index} is out of range (valid: 0..{bound})")]
    #[diagnostic(code(tileforge::range))]
    OutOfRange {
        what: &'static str,
        index: usize,
        bound: usize,
    },

    #[error("cannot grow {what} beyond {limit}")]
    #[diagnostic(code(tileforge::capacity))]
    CapacityExceeded { what: &'static str, limit: usize },

    #[error("cannot remove the last remaining {what}")]
    #[diagnostic(
        code(tileforge::last_entity),
        help("a project always keeps at least one tile, one supertile and a 1x1 map")
    )]
    LastEntity { what: &'static str },

    #[error("Decode error: {0}")]
    #[diagnostic(code(tileforge::decode))]
    Decode(#[from] DecodeError),

    #[error("Decode error in {path}: {source}")]
    #[diagnostic(code(tileforge::decode))]
    DecodeFile {
        path: std::path::PathBuf,
        source: DecodeError,
    },

    #[error("Project '{base}' is missing component file(s): {}", missing.join(", "))]
    #[diagnostic(
        code(tileforge::project::missing),
        help("a project is four files sharing one base name: .msxpal, .SC4Tiles, .SC4Super, .SC4Map")
    )]
    MissingFiles { base: String, missing: Vec<String> },

    #[error("{} already exists", path.display())]
    #[diagnostic(code(tileforge::project::exists), help("use --force to overwrite"))]
    AlreadyExists { path: std::path::PathBuf },

    #[error("Validation failed: {failed} of {total} project(s) had errors")]
    #[diagnostic(code(tileforge::validate))]
    ValidationFailed { failed: usize, total: usize },

    #[error("Config error: {message}")]
    #[diagnostic(code(tileforge::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Render error: {message}")]
    #[diagnostic(code(tileforge::render))]
    Render {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TileforgeError>;

/// Check that `index` addresses one of `bound` entries.
pub(crate) fn check_index(what: &'static str, index: usize, bound: usize) -> Result<()> {
    if index < bound {
        Ok(())
    } else {
        Err(TileforgeError::OutOfRange { what, index, bound })
    }
}
