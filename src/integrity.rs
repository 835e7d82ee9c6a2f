//! Reference integrity across the tile → supertile → map hierarchy.
//!
//! Supertile cells refer to tiles by index and map cells refer to supertiles
//! by index. Whenever a store inserts, deletes or reorders entries, every
//! stored reference into it has to be rewritten in the same step. The
//! functions here are pure: they take the referring cells and the structural
//! change, and rewrite the cells in place.
//!
//! The per-index functions (`index_after_*`) are the single source of truth
//! for the three rules; the container functions apply them cell by cell, and
//! editor cursors use them directly.

use std::collections::BTreeSet;

use crate::store::MapGrid;
use crate::types::Supertile;

/// Where a reference to `index` points after an entry is inserted at `at`.
pub fn index_after_insert(index: usize, at: usize) -> usize {
    if index >= at {
        index + 1
    } else {
        index
    }
}

/// Where a reference to `index` points after entry `at` is deleted.
///
/// References to the deleted entry fall back to entry 0; they never keep
/// pointing at whatever slid into the vacated slot.
pub fn index_after_delete(index: usize, at: usize) -> usize {
    if index == at {
        0
    } else if index > at {
        index - 1
    } else {
        index
    }
}

/// Final position of an entry moved from `source` to insertion point
/// `target` (an index in `0..=len`, "insert before").
pub fn move_destination(source: usize, target: usize) -> usize {
    if target > source {
        target - 1
    } else {
        target
    }
}

/// Where a reference to `index` points after moving `source` to `target`.
///
/// The moved entry follows the move; entries between the two positions slide
/// one slot towards the gap the move left; everything else stays.
pub fn index_after_move(index: usize, source: usize, target: usize) -> usize {
    let destination = move_destination(source, target);
    if index == source {
        destination
    } else if source < index && index <= destination {
        index - 1
    } else if destination <= index && index < source {
        index + 1
    } else {
        index
    }
}

/// Cursor position after entry `at` is deleted from a store that now holds
/// `new_len` entries. A cursor on the deleted entry stays in place, clamped
/// to the new end.
pub fn cursor_after_delete(cursor: usize, at: usize, new_len: usize) -> usize {
    if cursor > at {
        cursor - 1
    } else {
        cursor.min(new_len.saturating_sub(1))
    }
}

fn rewrite<'a>(cells: impl IntoIterator<Item = &'a mut u8>, f: impl Fn(usize) -> usize) -> usize {
    let mut changed = 0;
    for cell in cells {
        let remapped = f(*cell as usize);
        debug_assert!(remapped <= u8::MAX as usize, "remapped index {} overflows a cell", remapped);
        let remapped = remapped.min(u8::MAX as usize) as u8;
        if remapped != *cell {
            *cell = remapped;
            changed += 1;
        }
    }
    changed
}

/// Shift every reference at or after `at` up by one. Returns the number of
/// cells rewritten.
pub fn remap_on_insert<'a>(cells: impl IntoIterator<Item = &'a mut u8>, at: usize) -> usize {
    rewrite(cells, |index| index_after_insert(index, at))
}

/// Reset references to `at` to 0 and shift later references down by one.
/// Returns the number of cells rewritten.
pub fn remap_on_delete<'a>(cells: impl IntoIterator<Item = &'a mut u8>, at: usize) -> usize {
    rewrite(cells, |index| index_after_delete(index, at))
}

/// Rewrite references for a move of `source` to insertion point `target`.
/// Returns the number of cells rewritten.
pub fn reposition<'a>(
    cells: impl IntoIterator<Item = &'a mut u8>,
    source: usize,
    target: usize,
) -> usize {
    rewrite(cells, |index| index_after_move(index, source, target))
}

/// Supertiles that reference `tile` in at least one cell.
pub fn tile_usage(supertiles: &[Supertile], tile: usize) -> BTreeSet<usize> {
    supertiles
        .iter()
        .enumerate()
        .filter(|(_, st)| st.uses(tile))
        .map(|(index, _)| index)
        .collect()
}

/// Map cells `(row, col)` that reference `supertile`, in row-major order.
pub fn supertile_usage(map: &MapGrid, supertile: usize) -> Vec<(usize, usize)> {
    map.iter_cells()
        .filter(|&(_, _, value)| value as usize == supertile)
        .map(|(row, col, _)| (row, col))
        .collect()
}
