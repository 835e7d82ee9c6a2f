//! `.SC4Super`: a count byte, then 16 tile-index bytes per supertile.
//!
//! The file does not know the tileset size, so cell values are taken as-is;
//! the project clamps them against the loaded tileset afterwards.

use crate::error::DecodeError;
use crate::store::{SupertileStore, MAX_SUPERTILES};
use crate::types::{Supertile, SUPERTILE_DIM};
use crate::validation::Diagnostics;

use super::reader::ByteReader;
use super::{decode_count, encode_count};

/// Bytes per supertile record.
pub const SUPERTILE_RECORD_LEN: usize = SUPERTILE_DIM * SUPERTILE_DIM;

pub fn encode_supertiles(supertiles: &SupertileStore) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + supertiles.len() * SUPERTILE_RECORD_LEN);
    bytes.push(encode_count(supertiles.len()));
    for supertile in supertiles.supertiles() {
        bytes.extend(supertile.iter());
    }
    bytes
}

pub fn decode_supertiles(
    bytes: &[u8],
    diagnostics: &mut Diagnostics,
) -> Result<SupertileStore, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    let count = decode_count(&mut reader, "supertile count", MAX_SUPERTILES)?;
    reader.require(count * SUPERTILE_RECORD_LEN, format!("{} supertiles", count))?;

    let mut supertiles = Vec::with_capacity(count);
    for index in 0..count {
        let mut cells = [[0u8; SUPERTILE_DIM]; SUPERTILE_DIM];
        for (row, cells_row) in cells.iter_mut().enumerate() {
            *cells_row = reader.array::<SUPERTILE_DIM>(format!("supertile {} row {}", index, row))?;
        }
        supertiles.push(Supertile::from_cells(cells));
    }

    reader.finish("Supertile file", diagnostics);
    SupertileStore::from_supertiles(supertiles).map_err(|_| DecodeError::CountOutOfBounds {
        what: "supertile count",
        value: count,
        min: 1,
        max: MAX_SUPERTILES,
    })
}
