//! 8x8 two-tone tiles.
//!
//! A tile is one byte of pattern per row (bit 7 is the leftmost pixel, a set
//! bit selects the row's foreground colour) plus a foreground/background
//! palette slot pair per row.

use crate::error::{check_index, Result, TileforgeError};

use super::palette::{BLACK_SLOT, PALETTE_SLOTS, WHITE_SLOT};

/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 8;

/// Foreground/background palette slots for one tile row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowColours {
    pub fg: u8,
    pub bg: u8,
}

impl RowColours {
    /// White on black.
    pub const DEFAULT: Self = Self {
        fg: WHITE_SLOT,
        bg: BLACK_SLOT,
    };

    /// Create a pair, checking both slots.
    pub fn new(fg: u8, bg: u8) -> Result<Self> {
        check_index("palette slot", fg as usize, PALETTE_SLOTS)?;
        check_index("palette slot", bg as usize, PALETTE_SLOTS)?;
        Ok(Self { fg, bg })
    }

    /// Unpack from a colour byte: high nibble foreground, low nibble background.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            fg: (byte >> 4) & 0x0F,
            bg: byte & 0x0F,
        }
    }

    /// Pack into a colour byte.
    pub fn to_byte(self) -> u8 {
        (self.fg & 0x0F) << 4 | (self.bg & 0x0F)
    }
}

impl Default for RowColours {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One 8x8 tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Pattern rows, bit 7 = column 0.
    pattern: [u8; TILE_SIZE],
    /// Colour pair per row.
    colours: [RowColours; TILE_SIZE],
}

impl Default for Tile {
    fn default() -> Self {
        Self::blank()
    }
}

impl Tile {
    /// An all-background tile with default row colours.
    pub const fn blank() -> Self {
        Self {
            pattern: [0; TILE_SIZE],
            colours: [RowColours::DEFAULT; TILE_SIZE],
        }
    }

    /// Build a tile from raw parts.
    pub fn from_parts(pattern: [u8; TILE_SIZE], colours: [RowColours; TILE_SIZE]) -> Self {
        Self { pattern, colours }
    }

    /// Pattern byte for each row.
    pub fn pattern(&self) -> &[u8; TILE_SIZE] {
        &self.pattern
    }

    /// Colour pair for each row.
    pub fn row_colours(&self) -> &[RowColours; TILE_SIZE] {
        &self.colours
    }

    /// Whether the tile is blank.
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }

    /// Read one pixel.
    pub fn pixel(&self, row: usize, col: usize) -> Result<bool> {
        check_index("tile row", row, TILE_SIZE)?;
        check_index("tile column", col, TILE_SIZE)?;
        Ok(self.pixel_unchecked(row, col))
    }

    pub(crate) fn pixel_unchecked(&self, row: usize, col: usize) -> bool {
        self.pattern[row] >> (7 - col) & 1 == 1
    }

    /// Write one pixel. Returns whether anything changed.
    pub fn set_pixel(&mut self, row: usize, col: usize, value: bool) -> Result<bool> {
        if self.pixel(row, col)? == value {
            return Ok(false);
        }
        self.pattern[row] ^= 1 << (7 - col);
        Ok(true)
    }

    /// Set one row's colour pair. Returns whether anything changed.
    pub fn set_row_colours(&mut self, row: usize, fg: u8, bg: u8) -> Result<bool> {
        check_index("tile row", row, TILE_SIZE)?;
        let colours = RowColours::new(fg, bg)?;
        if self.colours[row] == colours {
            return Ok(false);
        }
        self.colours[row] = colours;
        Ok(true)
    }

    /// Mirror each row left to right. Row colours stay put.
    pub fn flip_horizontal(&mut self) {
        for row in &mut self.pattern {
            *row = row.reverse_bits();
        }
    }

    /// Mirror top to bottom; row colours travel with their rows.
    pub fn flip_vertical(&mut self) {
        self.pattern.reverse();
        self.colours.reverse();
    }

    /// Rotate the pattern 90 degrees clockwise.
    ///
    /// Row colours are reset to the default pair.
    pub fn rotate_90cw(&mut self) {
        let mut rotated = [0u8; TILE_SIZE];
        for row in 0..TILE_SIZE {
            for col in 0..TILE_SIZE {
                if self.pixel_unchecked(row, col) {
                    // (row, col) lands on (col, 7 - row)
                    rotated[col] |= 1 << (7 - (TILE_SIZE - 1 - row));
                }
            }
        }
        self.pattern = rotated;
        self.colours = [RowColours::DEFAULT; TILE_SIZE];
    }

    /// Cycle rows upward; the top row wraps to the bottom with its colours.
    pub fn shift_up(&mut self) {
        self.pattern.rotate_left(1);
        self.colours.rotate_left(1);
    }

    /// Cycle rows downward; the bottom row wraps to the top with its colours.
    pub fn shift_down(&mut self) {
        self.pattern.rotate_right(1);
        self.colours.rotate_right(1);
    }

    /// Cycle pixels left within each row.
    pub fn shift_left(&mut self) {
        for row in &mut self.pattern {
            *row = row.rotate_left(1);
        }
    }

    /// Cycle pixels right within each row.
    pub fn shift_right(&mut self) {
        for row in &mut self.pattern {
            *row = row.rotate_right(1);
        }
    }
}

/// Pattern-local tile transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    FlipHorizontal,
    FlipVertical,
    Rotate90Cw,
    ShiftUp,
    ShiftDown,
    ShiftLeft,
    ShiftRight,
}

impl Transform {
    /// Apply this transform to a tile.
    pub fn apply_to_tile(self, tile: &mut Tile) {
        match self {
            Transform::FlipHorizontal => tile.flip_horizontal(),
            Transform::FlipVertical => tile.flip_vertical(),
            Transform::Rotate90Cw => tile.rotate_90cw(),
            Transform::ShiftUp => tile.shift_up(),
            Transform::ShiftDown => tile.shift_down(),
            Transform::ShiftLeft => tile.shift_left(),
            Transform::ShiftRight => tile.shift_right(),
        }
    }
}

impl std::str::FromStr for Transform {
    type Err = TileforgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flip-h" | "flip-horizontal" => Ok(Transform::FlipHorizontal),
            "flip-v" | "flip-vertical" => Ok(Transform::FlipVertical),
            "rotate" | "rotate-90cw" => Ok(Transform::Rotate90Cw),
            "shift-up" => Ok(Transform::ShiftUp),
            "shift-down" => Ok(Transform::ShiftDown),
            "shift-left" => Ok(Transform::ShiftLeft),
            "shift-right" => Ok(Transform::ShiftRight),
            other => Err(TileforgeError::Config {
                message: format!("Unknown transform: {}", other),
                help: Some(
                    "Use flip-h, flip-v, rotate, shift-up, shift-down, shift-left or shift-right"
                        .to_string(),
                ),
            }),
        }
    }
}
