//! `.SC4Tiles`: a count byte, then per tile 8 pattern bytes and 8 colour bytes.

use crate::error::DecodeError;
use crate::store::{TileStore, MAX_TILES};
use crate::types::{RowColours, Tile, TILE_SIZE};
use crate::validation::Diagnostics;

use super::reader::ByteReader;
use super::{decode_count, encode_count};

/// Bytes per tile record.
pub const TILE_RECORD_LEN: usize = TILE_SIZE * 2;

pub fn encode_tileset(tiles: &TileStore) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(1 + tiles.len() * TILE_RECORD_LEN);
    bytes.push(encode_count(tiles.len()));
    for tile in tiles.tiles() {
        bytes.extend_from_slice(tile.pattern());
        bytes.extend(tile.row_colours().iter().map(|c| c.to_byte()));
    }
    bytes
}

/// Decode a tileset.
///
/// Colour nibbles are always valid slots once masked, so a well-sized file
/// decodes without payload warnings; only trailing bytes are reported.
pub fn decode_tileset(bytes: &[u8], diagnostics: &mut Diagnostics) -> Result<TileStore, DecodeError> {
    let mut reader = ByteReader::new(bytes);
    let count = decode_count(&mut reader, "tile count", MAX_TILES)?;
    reader.require(count * TILE_RECORD_LEN, format!("{} tiles", count))?;

    let mut tiles = Vec::with_capacity(count);
    for index in 0..count {
        let pattern = reader.array::<TILE_SIZE>(format!("tile {} pattern", index))?;
        let colour_bytes = reader.array::<TILE_SIZE>(format!("tile {} colours", index))?;
        let colours = colour_bytes.map(RowColours::from_byte);
        tiles.push(Tile::from_parts(pattern, colours));
    }

    reader.finish("Tileset file", diagnostics);
    TileStore::from_tiles(tiles).map_err(|_| DecodeError::CountOutOfBounds {
        what: "tile count",
        value: count,
        min: 1,
        max: MAX_TILES,
    })
}
