//! `.msxpal`: 16 RGB triples of channel levels, 48 bytes, no header.

use crate::error::DecodeError;
use crate::types::{Palette, Rgb7, PALETTE_SLOTS};
use crate::types::palette::MAX_LEVEL;
use crate::validation::{Diagnostic, Diagnostics};

use super::reader::ByteReader;

/// Exact size of a palette file.
pub const PALETTE_FILE_LEN: usize = PALETTE_SLOTS * 3;

pub fn encode_palette(palette: &Palette) -> Vec<u8> {
    palette
        .colours()
        .iter()
        .flat_map(|c| [c.r, c.g, c.b])
        .collect()
}

/// Decode a palette. Components above 7 are clamped to 7 with a warning.
pub fn decode_palette(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<Palette, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    reader.require(PALETTE_FILE_LEN, "palette")?;

    let mut colours = [Rgb7::default(); PALETTE_SLOTS];
    for (slot, colour) in colours.iter_mut().enumerate() {
        let [r, g, b] = reader.array::<3>(format!("palette slot {}", slot))?;
        if !Rgb7::is_valid_levels(r, g, b) {
            diagnostics.push(
                Diagnostic::warning(
                    "tileforge::decode::palette-level",
                    format!(
                        "Palette slot {} has levels ({}, {}, {}) above {}; clamped",
                        slot, r, g, b, MAX_LEVEL
                    ),
                )
                .with_help("Each channel of a palette entry is a level from 0 to 7"),
            );
        }
        *colour = Rgb7::new(r, g, b);
    }

    reader.finish("Palette file", diagnostics);
    Ok(Palette::new(colours))
}
