//! File system scanner for discovering projects.
//!
//! Recursively walks a directory and groups component files
//! (`.msxpal`, `.SC4Tiles`, `.SC4Super`, `.SC4Map`) by their base path.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use walkdir::WalkDir;

use super::paths::{Component, ProjectPaths};

/// A project base found on disk, with the components that exist for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundProject {
    pub paths: ProjectPaths,
    pub present: BTreeSet<Component>,
}

impl FoundProject {
    /// Whether all four component files exist.
    pub fn is_complete(&self) -> bool {
        self.present.len() == Component::ALL.len()
    }

    /// Components with no file.
    pub fn missing(&self) -> Vec<Component> {
        Component::ALL
            .into_iter()
            .filter(|c| !self.present.contains(c))
            .collect()
    }
}

/// Scan a directory tree for projects, sorted by base path.
///
/// `max_depth` limits recursion (1 = only files directly inside `root`).
pub fn scan_projects(root: &Path, max_depth: Option<usize>) -> Vec<FoundProject> {
    let mut found: BTreeMap<ProjectPaths, BTreeSet<Component>> = BTreeMap::new();

    if !root.exists() {
        return Vec::new();
    }

    let mut walker = WalkDir::new(root).follow_links(true);
    if let Some(depth) = max_depth {
        walker = walker.max_depth(depth);
    }

    for entry in walker.into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();

        // Skip directories
        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(component) = Component::from_path(path) {
            found
                .entry(ProjectPaths::resolve(path))
                .or_default()
                .insert(component);
        }
    }

    found
        .into_iter()
        .map(|(paths, present)| FoundProject { paths, present })
        .collect()
}
