//! Opening and saving projects.
//!
//! Opening reads and decodes all four files before building anything, so a
//! missing or malformed file leaves the caller's current project untouched.
//! Saving writes the files one after another and stops at the first failure.

use std::fs;
use std::path::Path;

use crate::codec;
use crate::error::{DecodeError, Result, TileforgeError};
use crate::validation::Diagnostics;

use super::paths::{Component, ProjectPaths};
use super::Project;

/// Open the project identified by `path` (any component file or the base).
///
/// Payload repairs and cross-reference clamps are appended to `diagnostics`.
pub fn open_project(path: impl AsRef<Path>, diagnostics: &mut Diagnostics) -> Result<Project> {
    let paths = ProjectPaths::resolve(path);

    let missing = paths.missing();
    if !missing.is_empty() {
        return Err(TileforgeError::MissingFiles {
            base: paths.base().display().to_string(),
            missing: missing
                .iter()
                .map(|&c| format!("{} (.{})", c, c.extension()))
                .collect(),
        });
    }

    // Decode into a scratch list so nothing escapes if a later file fails.
    let mut scratch = Diagnostics::new();
    let palette = decode(&paths, Component::Palette, &mut scratch, codec::decode_palette)?;
    let tiles = decode(&paths, Component::Tileset, &mut scratch, codec::decode_tileset)?;
    let supertiles = decode(&paths, Component::Supertiles, &mut scratch, codec::decode_supertiles)?;
    let map = decode(&paths, Component::Map, &mut scratch, codec::decode_map)?;

    let project = Project::from_parts(palette, tiles, supertiles, map, &mut scratch);
    log::info!(
        "opened {}: {} tiles, {} supertiles, {}x{} map",
        paths.name(),
        project.tiles().len(),
        project.supertiles().len(),
        project.map().width(),
        project.map().height()
    );
    diagnostics.merge(scratch);
    Ok(project)
}

fn decode<T>(
    paths: &ProjectPaths,
    component: Component,
    diagnostics: &mut Diagnostics,
    decoder: impl FnOnce(&[u8], &mut Diagnostics) -> std::result::Result<T, DecodeError>,
) -> Result<T> {
    let path = paths.path(component);
    let bytes = fs::read(&path).map_err(|e| TileforgeError::Io {
        path: path.clone(),
        message: format!("Failed to read {}: {}", component, e),
    })?;
    decoder(&bytes, diagnostics).map_err(|source| TileforgeError::DecodeFile { path, source })
}

/// Save `project` next to `path` (any component file or the base).
///
/// Files are written palette, tileset, supertiles, map. The first failed write
/// is returned and later files are not attempted. On success the project's
/// modified flag is cleared.
pub fn save_project(project: &mut Project, path: impl AsRef<Path>) -> Result<()> {
    let paths = ProjectPaths::resolve(path);

    for (component, file) in paths.all() {
        let bytes = match component {
            Component::Palette => codec::encode_palette(project.palette()),
            Component::Tileset => codec::encode_tileset(project.tiles()),
            Component::Supertiles => codec::encode_supertiles(project.supertiles()),
            Component::Map => codec::encode_map(project.map()),
        };
        fs::write(&file, &bytes).map_err(|e| TileforgeError::Io {
            path: file.clone(),
            message: format!("Failed to write {}: {}", component, e),
        })?;
        log::debug!("wrote {} ({} bytes)", file.display(), bytes.len());
    }

    project.mark_saved();
    log::info!("saved {}", paths.name());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MapGrid, SupertileStore, TileStore};
    use crate::types::{Palette, Rgb7, Supertile};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_minimal_project_round_trip() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("minimal");

        let mut palette = Palette::default();
        palette.set(0, Rgb7::new(0, 0, 0)).unwrap();
        let mut diagnostics = Diagnostics::new();
        let mut project = Project::from_parts(
            palette,
            TileStore::new(),
            SupertileStore::new(),
            MapGrid::new(2, 2).unwrap(),
            &mut diagnostics,
        );

        save_project(&mut project, &base).unwrap();
        let paths = ProjectPaths::resolve(&base);
        assert_eq!(fs::read(paths.path(Component::Map)).unwrap(), vec![0, 2, 0, 2, 0, 0, 0, 0]);
        assert_eq!(fs::read(paths.path(Component::Tileset)).unwrap().len(), 17);
        assert_eq!(fs::read(paths.path(Component::Supertiles)).unwrap().len(), 17);
        assert_eq!(fs::read(paths.path(Component::Palette)).unwrap().len(), 48);

        let reopened = open_project(paths.path(Component::Supertiles), &mut diagnostics).unwrap();
        assert!(diagnostics.is_ok());
        assert_eq!(reopened.palette(), project.palette());
        assert_eq!(reopened.tiles(), project.tiles());
        assert_eq!(reopened.supertiles(), project.supertiles());
        assert_eq!(reopened.map(), project.map());
    }

    #[test]
    fn test_save_clears_modified() {
        let dir = tempdir().unwrap();
        let mut project = Project::new();
        project.add_tile().unwrap();
        assert!(project.is_modified());
        save_project(&mut project, dir.path().join("p.SC4Map")).unwrap();
        assert!(!project.is_modified());
        assert!(dir.path().join("p.msxpal").is_file());
    }

    #[test]
    fn test_open_reports_missing_files() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("partial");
        save_project(&mut Project::new(), &base).unwrap();
        fs::remove_file(dir.path().join("partial.SC4Super")).unwrap();
        fs::remove_file(dir.path().join("partial.SC4Map")).unwrap();

        let mut diagnostics = Diagnostics::new();
        match open_project(&base, &mut diagnostics) {
            Err(TileforgeError::MissingFiles { missing, .. }) => {
                assert_eq!(missing, vec!["supertiles (.SC4Super)", "map (.SC4Map)"]);
            }
            other => panic!("expected MissingFiles, got {:?}", other),
        }
    }

    #[test]
    fn test_open_fails_on_corrupt_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("broken");
        save_project(&mut Project::new(), &base).unwrap();
        fs::write(dir.path().join("broken.SC4Map"), b"\x00\x01").unwrap();

        let mut diagnostics = Diagnostics::new();
        let err = open_project(&base, &mut diagnostics).unwrap_err();
        assert!(matches!(
            err,
            TileforgeError::DecodeFile {
                source: DecodeError::BadHeader { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_open_clamps_dangling_references() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("dangling");
        let mut project = Project::new();
        project.add_tile().unwrap();
        project.place_tile(0, 1, 1, 1).unwrap();
        save_project(&mut project, &base).unwrap();

        // shrink the tileset behind the project's back
        fs::write(
            dir.path().join("dangling.SC4Tiles"),
            codec::encode_tileset(&TileStore::new()),
        )
        .unwrap();

        let mut diagnostics = Diagnostics::new();
        let reopened = open_project(&base, &mut diagnostics).unwrap();
        assert_eq!(reopened.supertiles().get(0).unwrap(), Supertile::blank());
        assert_eq!(diagnostics.warning_count(), 1);
    }

    #[test]
    fn test_save_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        // a directory where the tileset file should go makes that write fail
        fs::create_dir(dir.path().join("blocked.SC4Tiles")).unwrap();

        let mut project = Project::new();
        project.add_tile().unwrap();
        let err = save_project(&mut project, dir.path().join("blocked")).unwrap_err();
        assert!(matches!(err, TileforgeError::Io { .. }));
        assert!(dir.path().join("blocked.msxpal").is_file());
        assert!(!dir.path().join("blocked.SC4Super").exists());
        assert!(project.is_modified());
    }
}
