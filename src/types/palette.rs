//! The 16-slot palette and its 512-colour channel-level space.
//!
//! Every palette slot holds an [`Rgb7`]: three channel levels in `0..=7`.
//! Levels map to 8-bit display values as `level * 36`, so the 512 possible
//! colours land on a fixed set of canonical hex values. The reverse mapping
//! only exists for those canonical values; anything else snaps to black and
//! is reported as a warning.

use log::warn;

use crate::error::{check_index, Result};
use crate::validation::Diagnostics;

use super::Colour;

/// Number of addressable palette slots.
pub const PALETTE_SLOTS: usize = 16;

/// Highest channel level.
pub const MAX_LEVEL: u8 = 7;

/// 8-bit value of one channel level step.
const LEVEL_STEP: u16 = 36;

/// Slot conventionally holding black.
pub const BLACK_SLOT: u8 = 1;

/// Slot conventionally holding white.
pub const WHITE_SLOT: u8 = 15;

/// A colour as three channel levels, each in `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb7 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb7 {
    /// Create a colour, clamping each level into `0..=7`.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: clamp_level(r),
            g: clamp_level(g),
            b: clamp_level(b),
        }
    }

    /// Whether all three raw components are valid levels.
    pub fn is_valid_levels(r: u8, g: u8, b: u8) -> bool {
        r <= MAX_LEVEL && g <= MAX_LEVEL && b <= MAX_LEVEL
    }

    /// The display colour for these levels.
    pub fn to_colour(self) -> Colour {
        Colour::rgb(level_to_byte(self.r), level_to_byte(self.g), level_to_byte(self.b))
    }

    /// Exact reverse lookup of a display colour.
    ///
    /// Returns `None` unless every channel is one of the 8 canonical values.
    pub fn from_colour(colour: Colour) -> Option<Self> {
        Some(Self {
            r: byte_to_level(colour.r)?,
            g: byte_to_level(colour.g)?,
            b: byte_to_level(colour.b)?,
        })
    }

    /// Reverse lookup that falls back to `(0,0,0)` for non-canonical colours,
    /// recording a warning.
    pub fn from_colour_or_black(colour: Colour, diagnostics: &mut Diagnostics) -> Self {
        match Self::from_colour(colour) {
            Some(levels) => levels,
            None => {
                diagnostics.warning(
                    "tileforge::palette::non-canonical",
                    format!("{} is not one of the 512 palette colours, using (0,0,0)", colour),
                );
                Self::default()
            }
        }
    }

    /// Parse a hex string and reverse-map it (see [`Rgb7::from_colour_or_black`]).
    pub fn from_hex(s: &str, diagnostics: &mut Diagnostics) -> Result<Self> {
        let colour = Colour::from_hex(s)?;
        Ok(Self::from_colour_or_black(colour, diagnostics))
    }

    /// All 512 level triples, red-major.
    pub fn all() -> impl Iterator<Item = Rgb7> {
        (0..=MAX_LEVEL).flat_map(|r| {
            (0..=MAX_LEVEL).flat_map(move |g| (0..=MAX_LEVEL).map(move |b| Rgb7 { r, g, b }))
        })
    }
}

const fn clamp_level(level: u8) -> u8 {
    if level > MAX_LEVEL {
        MAX_LEVEL
    } else {
        level
    }
}

fn level_to_byte(level: u8) -> u8 {
    (level as u16 * LEVEL_STEP).min(255) as u8
}

fn byte_to_level(value: u8) -> Option<u8> {
    let value = value as u16;
    if value % LEVEL_STEP == 0 && value / LEVEL_STEP <= MAX_LEVEL as u16 {
        Some((value / LEVEL_STEP) as u8)
    } else {
        None
    }
}

/// MSX2 power-on palette.
const DEFAULT_COLOURS: [Rgb7; PALETTE_SLOTS] = [
    Rgb7::new(0, 0, 0),
    Rgb7::new(0, 0, 0),
    Rgb7::new(1, 6, 1),
    Rgb7::new(3, 7, 3),
    Rgb7::new(1, 1, 7),
    Rgb7::new(2, 3, 7),
    Rgb7::new(5, 1, 1),
    Rgb7::new(2, 6, 7),
    Rgb7::new(7, 1, 1),
    Rgb7::new(7, 3, 3),
    Rgb7::new(6, 6, 1),
    Rgb7::new(6, 6, 4),
    Rgb7::new(1, 4, 1),
    Rgb7::new(6, 2, 5),
    Rgb7::new(5, 5, 5),
    Rgb7::new(7, 7, 7),
];

/// The 16 active colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colours: [Rgb7; PALETTE_SLOTS],
}

impl Palette {
    /// Create a palette from explicit slot colours.
    pub fn new(colours: [Rgb7; PALETTE_SLOTS]) -> Self {
        Self { colours }
    }

    /// Get the colour in a slot.
    pub fn get(&self, slot: usize) -> Result<Rgb7> {
        check_index("palette slot", slot, PALETTE_SLOTS)?;
        Ok(self.colours[slot])
    }

    /// Set the colour of a slot. Returns whether the slot changed.
    pub fn set(&mut self, slot: usize, colour: Rgb7) -> Result<bool> {
        check_index("palette slot", slot, PALETTE_SLOTS)?;
        if self.colours[slot] == colour {
            return Ok(false);
        }
        self.colours[slot] = colour;
        Ok(true)
    }

    /// All slot colours.
    pub fn colours(&self) -> &[Rgb7; PALETTE_SLOTS] {
        &self.colours
    }

    /// Display colour for a slot; out-of-range slots resolve to `None`.
    pub fn display(&self, slot: u8) -> Option<Colour> {
        self.colours.get(slot as usize).map(|c| c.to_colour())
    }

    /// Display colours for all 16 slots.
    pub fn display_colours(&self) -> [Colour; PALETTE_SLOTS] {
        self.colours.map(Rgb7::to_colour)
    }

    /// Build a palette from up to 16 display colours, reverse-mapping each.
    ///
    /// Missing slots keep their default colour.
    pub fn from_display_colours(colours: &[Colour], diagnostics: &mut Diagnostics) -> Self {
        let mut palette = Self::default();
        if colours.len() > PALETTE_SLOTS {
            warn!(
                "only the first {} of {} colours fit in the palette",
                PALETTE_SLOTS,
                colours.len()
            );
        }
        for (slot, &colour) in colours.iter().take(PALETTE_SLOTS).enumerate() {
            palette.colours[slot] = Rgb7::from_colour_or_black(colour, diagnostics);
        }
        palette
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_COLOURS)
    }
}
