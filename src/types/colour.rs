//! Raster colour type and hex parsing.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;

use crate::error::{Result, TileforgeError};

/// An 8-bit-per-channel RGBA colour as written into rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Flat fill for a tile index that does not exist.
    pub const INVALID_TILE: Self = Self::rgb(255, 0, 255);

    /// Flat fill for a supertile index that does not exist, or a supertile
    /// rendered too small to hold its tiles.
    pub const INVALID_SUPERTILE: Self = Self::rgb(0, 255, 255);

    /// Parse a `#RRGGBB` or `#RGB` hex string (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (i, c) in hex.chars().enumerate() {
                    let d = c.to_digit(16).ok_or_else(|| invalid_hex(s))? as u8;
                    channels[i] = d << 4 | d;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2]).ok_or_else(|| invalid_hex(s))?;
                let g = parse_hex_byte(&hex[2..4]).ok_or_else(|| invalid_hex(s))?;
                let b = parse_hex_byte(&hex[4..6]).ok_or_else(|| invalid_hex(s))?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Black or white, whichever reads better on top of this colour.
    pub fn contrast(self) -> Self {
        let rgb: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        let luminance = 0.299 * rgb.red + 0.587 * rgb.green + 0.114 * rgb.blue;
        if luminance > 0.5 {
            Self::BLACK
        } else {
            Self::WHITE
        }
    }
}

impl FromStr for Colour {
    type Err = TileforgeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex_byte(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}

fn invalid_hex(s: &str) -> TileforgeError {
    TileforgeError::Config {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}
