//! `.SC4Map`: big-endian u16 width and height, then one byte per cell.

use crate::error::DecodeError;
use crate::store::{MapGrid, MAX_MAP_DIM, MIN_MAP_DIM};
use crate::validation::Diagnostics;

use super::reader::ByteReader;

/// Size of the dimension header.
pub const MAP_HEADER_LEN: usize = 4;

pub fn encode_map(map: &MapGrid) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAP_HEADER_LEN + map.cells().len());
    // dimensions are bounded to 1024 so they always fit a u16
    bytes.extend_from_slice(&(map.width() as u16).to_be_bytes());
    bytes.extend_from_slice(&(map.height() as u16).to_be_bytes());
    bytes.extend_from_slice(map.cells());
    bytes
}

/// Decode a map. Supertile indices are not checked against any supertile set.
pub fn decode_map(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<MapGrid, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    if reader.remaining() < MAP_HEADER_LEN {
        return Err(DecodeError::BadHeader {
            message: format!(
                "map header needs {} bytes, file has {}",
                MAP_HEADER_LEN,
                reader.remaining()
            ),
        });
    }

    let width = reader.u16_be("map width")? as usize;
    let height = reader.u16_be("map height")? as usize;
    for (what, value) in [("map width", width), ("map height", height)] {
        if !(MIN_MAP_DIM..=MAX_MAP_DIM).contains(&value) {
            return Err(DecodeError::CountOutOfBounds {
                what,
                value,
                min: MIN_MAP_DIM,
                max: MAX_MAP_DIM,
            });
        }
    }

    let cells = reader.take(width * height, format!("{}x{} map cells", width, height))?;
    let cells = cells.to_vec();
    reader.finish("Map file", diagnostics);

    MapGrid::from_cells(width, height, cells).map_err(|_| DecodeError::BadHeader {
        message: format!("map dimensions {}x{} rejected", width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_sizes() {
        for (w, h) in [(1usize, 1usize), (32, 24), (1024, 3), (1024, 1024)] {
            let cells = (0..w * h).map(|i| (i * 7 % 256) as u8).collect();
            let map = MapGrid::from_cells(w, h, cells).unwrap();
            let bytes = encode_map(&map);
            assert_eq!(bytes.len(), MAP_HEADER_LEN + w * h);

            let mut diagnostics = Diagnostics::new();
            assert_eq!(decode_map(&bytes, &mut diagnostics).unwrap(), map);
        }
    }

    #[test]
    fn test_header_is_big_endian() {
        let map = MapGrid::new(300, 2).unwrap();
        let bytes = encode_map(&map);
        assert_eq!(&bytes[..4], &[0x01, 0x2C, 0x00, 0x02]);
    }

    #[test]
    fn test_short_header() {
        let mut diagnostics = Diagnostics::new();
        assert!(matches!(
            decode_map(&[0, 1, 0], &mut diagnostics),
            Err(DecodeError::BadHeader { .. })
        ));
    }

    #[test]
    fn test_dimensions_out_of_bounds() {
        let mut diagnostics = Diagnostics::new();
        assert!(matches!(
            decode_map(&[0, 0, 0, 1, 0], &mut diagnostics),
            Err(DecodeError::CountOutOfBounds { what: "map width", value: 0, .. })
        ));
        assert!(matches!(
            decode_map(&[0, 1, 0x04, 0x01], &mut diagnostics),
            Err(DecodeError::CountOutOfBounds { what: "map height", value: 1025, .. })
        ));
    }

    #[test]
    fn test_truncated_cells() {
        let mut diagnostics = Diagnostics::new();
        assert!(matches!(
            decode_map(&[0, 2, 0, 2, 1, 2, 3], &mut diagnostics),
            Err(DecodeError::UnexpectedEof { needed: 4, available: 3, .. })
        ));
    }
}
