//! Supertiles: 4x4 matrices of tile indices.

use crate::error::{check_index, Result};

use super::tile::Transform;

/// Supertile edge length in tiles.
pub const SUPERTILE_DIM: usize = 4;

/// A 4x4 arrangement of tile references. Cells hold tile indices only; the
/// tiles themselves live in the tile store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Supertile {
    cells: [[u8; SUPERTILE_DIM]; SUPERTILE_DIM],
}

impl Supertile {
    /// A supertile with every cell referencing tile 0.
    pub const fn blank() -> Self {
        Self {
            cells: [[0; SUPERTILE_DIM]; SUPERTILE_DIM],
        }
    }

    /// Build from a row-major cell matrix.
    pub fn from_cells(cells: [[u8; SUPERTILE_DIM]; SUPERTILE_DIM]) -> Self {
        Self { cells }
    }

    /// Row-major cell matrix.
    pub fn cells(&self) -> &[[u8; SUPERTILE_DIM]; SUPERTILE_DIM] {
        &self.cells
    }

    /// Tile index at a cell.
    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        check_index("supertile row", row, SUPERTILE_DIM)?;
        check_index("supertile column", col, SUPERTILE_DIM)?;
        Ok(self.cells[row][col])
    }

    /// Store a tile index in a cell without validating it against any tile
    /// store. Returns whether the cell changed.
    pub(crate) fn set(&mut self, row: usize, col: usize, tile: u8) -> Result<bool> {
        if self.get(row, col)? == tile {
            return Ok(false);
        }
        self.cells[row][col] = tile;
        Ok(true)
    }

    /// Whether any cell references `tile`.
    pub fn uses(&self, tile: usize) -> bool {
        self.iter().any(|t| t as usize == tile)
    }

    /// Iterate over all 16 tile indices in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Mutable access to all 16 cells in row-major order.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut u8> + '_ {
        self.cells.iter_mut().flat_map(|row| row.iter_mut())
    }

    pub fn flip_horizontal(&mut self) {
        for row in &mut self.cells {
            row.reverse();
        }
    }

    pub fn flip_vertical(&mut self) {
        self.cells.reverse();
    }

    pub fn rotate_90cw(&mut self) {
        let mut rotated = [[0u8; SUPERTILE_DIM]; SUPERTILE_DIM];
        for (r, row) in self.cells.iter().enumerate() {
            for (c, &tile) in row.iter().enumerate() {
                rotated[c][SUPERTILE_DIM - 1 - r] = tile;
            }
        }
        self.cells = rotated;
    }

    pub fn shift_up(&mut self) {
        self.cells.rotate_left(1);
    }

    pub fn shift_down(&mut self) {
        self.cells.rotate_right(1);
    }

    pub fn shift_left(&mut self) {
        for row in &mut self.cells {
            row.rotate_left(1);
        }
    }

    pub fn shift_right(&mut self) {
        for row in &mut self.cells {
            row.rotate_right(1);
        }
    }
}

impl Transform {
    /// Apply this transform to a supertile's cell matrix.
    pub fn apply_to_supertile(self, supertile: &mut Supertile) {
        match self {
            Transform::FlipHorizontal => supertile.flip_horizontal(),
            Transform::FlipVertical => supertile.flip_vertical(),
            Transform::Rotate90Cw => supertile.rotate_90cw(),
            Transform::ShiftUp => supertile.shift_up(),
            Transform::ShiftDown => supertile.shift_down(),
            Transform::ShiftLeft => supertile.shift_left(),
            Transform::ShiftRight => supertile.shift_right(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered() -> Supertile {
        let mut cells = [[0u8; SUPERTILE_DIM]; SUPERTILE_DIM];
        for (r, row) in cells.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (r * SUPERTILE_DIM + c) as u8;
            }
        }
        Supertile::from_cells(cells)
    }

    #[test]
    fn test_get_set() {
        let mut st = Supertile::blank();
        assert!(st.set(1, 2, 5).unwrap());
        assert!(!st.set(1, 2, 5).unwrap());
        assert_eq!(st.get(1, 2).unwrap(), 5);
        assert!(st.get(4, 0).is_err());
        assert!(st.uses(5));
        assert!(!st.uses(6));
    }

    #[test]
    fn test_flips() {
        let mut st = numbered();
        st.flip_horizontal();
        assert_eq!(st.cells()[0], [3, 2, 1, 0]);

        let mut st = numbered();
        st.flip_vertical();
        assert_eq!(st.cells()[0], [12, 13, 14, 15]);
    }

    #[test]
    fn test_rotate() {
        let mut st = numbered();
        st.rotate_90cw();
        assert_eq!(st.cells()[0], [12, 8, 4, 0]);
        assert_eq!(st.cells()[3], [15, 11, 7, 3]);
    }

    #[test]
    fn test_shifts_keep_identities() {
        let mut st = numbered();
        Transform::ShiftLeft.apply_to_supertile(&mut st);
        assert_eq!(st.cells()[0], [1, 2, 3, 0]);
        Transform::ShiftUp.apply_to_supertile(&mut st);
        assert_eq!(st.cells()[3], [1, 2, 3, 0]);

        let mut sorted: Vec<u8> = st.iter().collect();
        sorted.sort();
        assert_eq!(sorted, (0..16).collect::<Vec<u8>>());
    }
}
