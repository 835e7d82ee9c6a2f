//! Resolution of a project's four component paths.
//!
//! A project on disk is `<base>.msxpal`, `<base>.SC4Tiles`, `<base>.SC4Super`
//! and `<base>.SC4Map`. Any one of them, or the bare base path, identifies the
//! project.

use std::fmt;
use std::path::{Path, PathBuf};

/// One of the four files that make up a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Palette,
    Tileset,
    Supertiles,
    Map,
}

impl Component {
    /// All components, in save order.
    pub const ALL: [Component; 4] = [
        Component::Palette,
        Component::Tileset,
        Component::Supertiles,
        Component::Map,
    ];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Component::Palette => "msxpal",
            Component::Tileset => "SC4Tiles",
            Component::Supertiles => "SC4Super",
            Component::Map => "SC4Map",
        }
    }

    /// Identify a component from a path's extension (ASCII case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL
            .into_iter()
            .find(|c| c.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Palette => write!(f, "palette"),
            Component::Tileset => write!(f, "tileset"),
            Component::Supertiles => write!(f, "supertiles"),
            Component::Map => write!(f, "map"),
        }
    }
}

/// The base path shared by a project's component files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectPaths {
    base: PathBuf,
}

impl ProjectPaths {
    /// Resolve from a base path or from any component file.
    pub fn resolve(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let base = if Component::from_path(path).is_some() {
            path.with_extension("")
        } else {
            path.to_path_buf()
        };
        Self { base }
    }

    /// The extension-less base path.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Base file name, for messages.
    pub fn name(&self) -> String {
        self.base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.base.display().to_string())
    }

    /// Path of one component file.
    pub fn path(&self, component: Component) -> PathBuf {
        // with_extension would eat a dotted base name like "level.v2"
        let mut name = self.base.clone().into_os_string();
        name.push(".");
        name.push(component.extension());
        PathBuf::from(name)
    }

    /// All four component paths, in save order.
    pub fn all(&self) -> [(Component, PathBuf); 4] {
        Component::ALL.map(|c| (c, self.path(c)))
    }

    /// Components whose file does not exist.
    pub fn missing(&self) -> Vec<Component> {
        Component::ALL
            .into_iter()
            .filter(|&c| !self.path(c).is_file())
            .collect()
    }
}
