//! Classifying a grid position in an entity selector.
//!
//! Selectors lay entities out left to right, `columns` per row. A pointer
//! position expressed in selector cells (already divided by the cell size)
//! lands on an existing entity, on an empty cell after the last one, or
//! outside the selector entirely.

/// Where a selector position landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotHit {
    /// An existing entity.
    Item(usize),
    /// Inside the selector, past the last entity. Carries the index an
    /// append would receive.
    PastEnd(usize),
    /// Left of, right of or above the selector.
    Outside,
    /// The layout itself is unusable (zero columns).
    Invalid,
}

impl SlotHit {
    /// The entity index, if an existing entity was hit.
    pub fn item(self) -> Option<usize> {
        match self {
            SlotHit::Item(index) => Some(index),
            _ => None,
        }
    }

    /// The drop position for a reorder: an existing slot, or the end.
    pub fn drop_target(self) -> Option<usize> {
        match self {
            SlotHit::Item(index) | SlotHit::PastEnd(index) => Some(index),
            _ => None,
        }
    }
}

/// Classify selector cell `(col, row)` for `count` entities laid out
/// `columns` per row. Negative coordinates are outside.
pub fn locate(col: i64, row: i64, columns: usize, count: usize) -> SlotHit {
    if columns == 0 {
        return SlotHit::Invalid;
    }
    if col < 0 || row < 0 || col as u64 >= columns as u64 {
        return SlotHit::Outside;
    }
    let index = (row as u64)
        .saturating_mul(columns as u64)
        .saturating_add(col as u64);
    if index < count as u64 {
        SlotHit::Item(index as usize)
    } else {
        SlotHit::PastEnd(count)
    }
}
