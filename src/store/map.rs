//! The map: a grid of supertile indices.

use crate::error::{check_index, Result, TileforgeError};

/// Smallest allowed map edge, in supertiles.
pub const MIN_MAP_DIM: usize = 1;

/// Largest allowed map edge, in supertiles.
pub const MAX_MAP_DIM: usize = 1024;

/// Default width of a new map.
pub const DEFAULT_MAP_WIDTH: usize = 32;

/// Default height of a new map.
pub const DEFAULT_MAP_HEIGHT: usize = 24;

/// A `width` x `height` grid of supertile indices, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Default for MapGrid {
    fn default() -> Self {
        Self {
            width: DEFAULT_MAP_WIDTH,
            height: DEFAULT_MAP_HEIGHT,
            cells: vec![0; DEFAULT_MAP_WIDTH * DEFAULT_MAP_HEIGHT],
        }
    }
}

impl MapGrid {
    /// An all-zero map.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    /// Build a map from row-major cells.
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(TileforgeError::OutOfRange {
                what: "map cell count",
                index: cells.len(),
                bound: width * height,
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Supertile index at a cell.
    pub fn get(&self, row: usize, col: usize) -> Result<u8> {
        let offset = self.offset(row, col)?;
        Ok(self.cells[offset])
    }

    /// Set a cell. Bounds are checked against the grid only; supertile
    /// validity is the caller's concern (see `Project::paint_map`).
    /// Returns whether the cell changed.
    pub fn set(&mut self, row: usize, col: usize, supertile: u8) -> Result<bool> {
        let offset = self.offset(row, col)?;
        if self.cells[offset] == supertile {
            return Ok(false);
        }
        self.cells[offset] = supertile;
        Ok(true)
    }

    /// Set every cell to supertile 0. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        let changed = self.cells.iter().any(|&c| c != 0);
        self.cells.fill(0);
        changed
    }

    /// Resize, keeping the overlapping top-left rectangle. New cells are 0.
    /// Returns whether the dimensions changed.
    pub fn resize(&mut self, new_width: usize, new_height: usize) -> Result<bool> {
        check_dimensions(new_width, new_height)?;
        if (new_width, new_height) == self.size() {
            return Ok(false);
        }

        let mut cells = vec![0; new_width * new_height];
        let copy_w = self.width.min(new_width);
        for row in 0..self.height.min(new_height) {
            let src = row * self.width;
            let dst = row * new_width;
            cells[dst..dst + copy_w].copy_from_slice(&self.cells[src..src + copy_w]);
        }

        self.width = new_width;
        self.height = new_height;
        self.cells = cells;
        Ok(true)
    }

    /// Iterate over all cells as `(row, col, supertile)`.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &value)| (i / width, i % width, value))
    }

    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        check_index("map row", row, self.height)?;
        check_index("map column", col, self.width)?;
        Ok(row * self.width + col)
    }
}

/// Validate map dimensions against `1..=1024`.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<()> {
    for (what, value) in [("map width", width), ("map height", height)] {
        if value < MIN_MAP_DIM {
            return Err(TileforgeError::OutOfRange {
                what,
                index: value,
                bound: MAX_MAP_DIM + 1,
            });
        }
        if value > MAX_MAP_DIM {
            return Err(TileforgeError::CapacityExceeded {
                what,
                limit: MAX_MAP_DIM,
            });
        }
    }
    Ok(())
}
