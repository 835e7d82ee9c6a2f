//! Binary formats for the four project component files.
//!
//! Encoders never fail on a valid store. Decoders check header fields before
//! trusting any payload length, fail with [`DecodeError`] on structural
//! problems, and record payload-level repairs in a [`Diagnostics`] list.
//! Cross-file references are checked by the project after all four loads.
//!
//! [`Diagnostics`]: crate::validation::Diagnostics

mod map;
mod palette;
mod reader;
mod supertiles;
mod tileset;

pub use map::{decode_map, encode_map, MAP_HEADER_LEN};
pub use palette::{decode_palette, encode_palette, PALETTE_FILE_LEN};
pub use supertiles::{decode_supertiles, encode_supertiles, SUPERTILE_RECORD_LEN};
pub use tileset::{decode_tileset, encode_tileset, TILE_RECORD_LEN};

use crate::error::DecodeError;

use reader::ByteReader;

/// Count byte for a store of `1..=256` entries. 256 wraps to 0.
pub(crate) fn encode_count(count: usize) -> u8 {
    debug_assert!((1..=256).contains(&count));
    (count % 256) as u8
}

/// Read a count byte, where 0 stands for `max` (256).
pub(crate) fn decode_count(
    reader: &mut ByteReader<'_>,
    what: &'static str,
    max: usize,
) -> Result<usize, DecodeError> {
    if reader.remaining() == 0 {
        return Err(DecodeError::BadHeader {
            message: format!("file is empty; expected a {} byte", what),
        });
    }
    let byte = reader.u8(what)?;
    let count = if byte == 0 { max } else { byte as usize };
    if count > max {
        return Err(DecodeError::CountOutOfBounds {
            what,
            value: count,
            min: 1,
            max,
        });
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_byte() {
        assert_eq!(encode_count(1), 1);
        assert_eq!(encode_count(255), 255);
        assert_eq!(encode_count(256), 0);

        let mut reader = ByteReader::new(&[0, 9]);
        assert_eq!(decode_count(&mut reader, "tile count", 256).unwrap(), 256);
        assert_eq!(decode_count(&mut reader, "tile count", 256).unwrap(), 9);
    }

    #[test]
    fn test_count_above_max() {
        let mut reader = ByteReader::new(&[20]);
        assert!(matches!(
            decode_count(&mut reader, "tile count", 16),
            Err(DecodeError::CountOutOfBounds { value: 20, .. })
        ));
    }
}
