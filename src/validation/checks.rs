//! Cross-reference checks run after the four component files are loaded.
//!
//! The codec only validates a file against its own declared counts. Whether a
//! supertile's tile indices exist in the tileset, or a map cell's supertile
//! exists in the supertile set, can only be decided once everything is in
//! memory. Dangling references are reset to 0 and reported.

use crate::store::{MapGrid, SupertileStore};

use super::warning::{Diagnostic, Diagnostics};

/// Clamp supertile cells that name a tile `>= tile_count` to 0.
/// Returns the number of cells reset.
pub fn clamp_supertile_refs(
    supertiles: &mut SupertileStore,
    tile_count: usize,
    diagnostics: &mut Diagnostics,
) -> usize {
    let mut clamped = 0;
    for (index, supertile) in supertiles.supertiles_mut().iter_mut().enumerate() {
        for (cell, tile) in supertile.iter_mut().enumerate() {
            if (*tile as usize) < tile_count {
                continue;
            }
            diagnostics.push(
                Diagnostic::warning(
                    "tileforge::validate::dangling-tile",
                    format!(
                        "Supertile {} cell ({}, {}) references tile {} but only {} exist; reset to 0",
                        index,
                        cell / 4,
                        cell % 4,
                        tile,
                        tile_count
                    ),
                )
                .with_help("Re-save the project to make the repair permanent"),
            );
            *tile = 0;
            clamped += 1;
        }
    }
    clamped
}

/// Clamp map cells that name a supertile `>= supertile_count` to 0.
/// Returns the number of cells reset.
pub fn clamp_map_refs(
    map: &mut MapGrid,
    supertile_count: usize,
    diagnostics: &mut Diagnostics,
) -> usize {
    let width = map.width();
    let mut clamped = 0;
    for (offset, cell) in map.cells_mut().iter_mut().enumerate() {
        if (*cell as usize) < supertile_count {
            continue;
        }
        diagnostics.push(
            Diagnostic::warning(
                "tileforge::validate::dangling-supertile",
                format!(
                    "Map cell ({}, {}) references supertile {} but only {} exist; reset to 0",
                    offset / width,
                    offset % width,
                    cell,
                    supertile_count
                ),
            )
            .with_help("Re-save the project to make the repair permanent"),
        );
        *cell = 0;
        clamped += 1;
    }
    clamped
}

/// Report tiles that no supertile uses, and supertiles the map never places.
/// Informational only; nothing is modified.
pub fn check_unused(
    tile_count: usize,
    supertiles: &SupertileStore,
    map: &MapGrid,
    diagnostics: &mut Diagnostics,
) {
    let mut tile_used = vec![false; tile_count];
    for tile in supertiles.supertiles().iter().flat_map(|st| st.iter()) {
        if let Some(used) = tile_used.get_mut(tile as usize) {
            *used = true;
        }
    }
    let unused_tiles = tile_used.iter().filter(|&&used| !used).count();
    if unused_tiles > 0 {
        diagnostics.warning(
            "tileforge::validate::unused-tile",
            format!("{} of {} tiles are not used by any supertile", unused_tiles, tile_count),
        );
    }

    let mut supertile_used = vec![false; supertiles.len()];
    for &cell in map.cells() {
        if let Some(used) = supertile_used.get_mut(cell as usize) {
            *used = true;
        }
    }
    let unused_supertiles = supertile_used.iter().filter(|&&used| !used).count();
    if unused_supertiles > 0 {
        diagnostics.warning(
            "tileforge::validate::unused-supertile",
            format!(
                "{} of {} supertiles are not placed on the map",
                unused_supertiles,
                supertiles.len()
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Supertile;

    #[test]
    fn test_clamp_supertile_refs() {
        let mut st = Supertile::blank();
        st.set(0, 1, 5).unwrap();
        st.set(2, 3, 2).unwrap();
        let mut store = SupertileStore::from_supertiles(vec![Supertile::blank(), st]).unwrap();
        let mut diagnostics = Diagnostics::new();

        assert_eq!(clamp_supertile_refs(&mut store, 3, &mut diagnostics), 1);
        let fixed = store.get(1).unwrap();
        assert_eq!(fixed.get(0, 1).unwrap(), 0);
        assert_eq!(fixed.get(2, 3).unwrap(), 2);
        assert_eq!(diagnostics.warning_count(), 1);
        assert!(diagnostics
            .iter()
            .all(|d| d.code == "tileforge::validate::dangling-tile"));
    }

    #[test]
    fn test_clamp_map_refs() {
        let mut map = MapGrid::from_cells(2, 2, vec![0, 1, 4, 9]).unwrap();
        let mut diagnostics = Diagnostics::new();

        assert_eq!(clamp_map_refs(&mut map, 2, &mut diagnostics), 2);
        assert_eq!(map.cells(), &[0, 1, 0, 0]);
        assert_eq!(diagnostics.warning_count(), 2);
    }

    #[test]
    fn test_clamp_clean_data_is_silent() {
        let mut store = SupertileStore::new();
        let mut map = MapGrid::default();
        let mut diagnostics = Diagnostics::new();
        assert_eq!(clamp_supertile_refs(&mut store, 1, &mut diagnostics), 0);
        assert_eq!(clamp_map_refs(&mut map, 1, &mut diagnostics), 0);
        assert!(diagnostics.is_ok());
    }

    #[test]
    fn test_check_unused() {
        let mut st = Supertile::blank();
        st.set(0, 0, 1).unwrap();
        let store = SupertileStore::from_supertiles(vec![st, Supertile::blank()]).unwrap();
        let map = MapGrid::new(2, 1).unwrap();
        let mut diagnostics = Diagnostics::new();

        check_unused(3, &store, &map, &mut diagnostics);
        let codes: Vec<_> = diagnostics.iter().map(|d| d.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "tileforge::validate::unused-tile",
                "tileforge::validate::unused-supertile"
            ]
        );
    }
}
