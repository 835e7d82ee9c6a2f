//! Raster pixel buffers and the pure tile rasteriser.

use crate::types::{Colour, Palette, Tile, TILE_SIZE};

/// A rendered bitmap: `width * height` colours, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Colour>,
}

impl Raster {
    /// A raster filled with one colour.
    pub fn filled(width: usize, height: usize, colour: Colour) -> Self {
        Self {
            width,
            height,
            pixels: vec![colour; width * height],
        }
    }

    /// A fully transparent raster.
    pub fn transparent(width: usize, height: usize) -> Self {
        Self::filled(width, height, Colour::default())
    }

    /// Get the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the dimensions as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get a pixel at the given position.
    pub fn get(&self, x: usize, y: usize) -> Option<Colour> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Set a pixel; writes outside the raster are dropped.
    pub fn set(&mut self, x: usize, y: usize, colour: Colour) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = colour;
        }
    }

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }

    /// Iterate over the rows of the raster.
    pub fn rows(&self) -> impl Iterator<Item = &[Colour]> {
        // a zero-width raster has no pixels, so the max(1) never yields a row
        self.pixels.chunks(self.width.max(1))
    }

    /// Whether every pixel has the same colour.
    pub fn is_flat(&self) -> bool {
        self.pixels.windows(2).all(|w| w[0] == w[1])
    }

    /// Copy `source` onto this raster at an offset, clipped to the bounds.
    pub fn blit(&mut self, source: &Raster, offset_x: usize, offset_y: usize) {
        for sy in 0..source.height {
            let dy = offset_y + sy;
            if dy >= self.height {
                break;
            }
            for sx in 0..source.width {
                let dx = offset_x + sx;
                if dx >= self.width {
                    break;
                }
                self.pixels[dy * self.width + dx] = source.pixels[sy * source.width + sx];
            }
        }
    }

    /// Nearest-neighbour integer upscale.
    pub fn scaled(&self, scale: u32) -> Raster {
        let scale = scale.max(1) as usize;
        if scale == 1 {
            return self.clone();
        }

        let mut scaled = Raster::transparent(self.width * scale, self.height * scale);
        for y in 0..scaled.height {
            for x in 0..scaled.width {
                scaled.pixels[y * scaled.width + x] = self.pixels[(y / scale) * self.width + x / scale];
            }
        }
        scaled
    }

    /// Convert to a flat RGBA buffer (for image output).
    pub fn to_rgba_buffer(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.pixels.len() * 4);
        for colour in &self.pixels {
            buffer.extend_from_slice(&colour.to_rgba());
        }
        buffer
    }
}

/// Rasterise one tile at `size` x `size` pixels.
///
/// Each output pixel samples the tile by nearest neighbour. Set bits take the
/// row's foreground slot, clear bits its background slot.
pub fn rasterize_tile(tile: &Tile, palette: &Palette, size: usize) -> Raster {
    let mut raster = Raster::transparent(size, size);
    if size == 0 {
        return raster;
    }

    let colours = tile.row_colours();
    for y in 0..size {
        let row = (y * TILE_SIZE / size).min(TILE_SIZE - 1);
        let fg = palette.display(colours[row].fg).unwrap_or(Colour::INVALID_TILE);
        let bg = palette.display(colours[row].bg).unwrap_or(Colour::INVALID_TILE);
        for x in 0..size {
            let col = (x * TILE_SIZE / size).min(TILE_SIZE - 1);
            let colour = if tile.pixel_unchecked(row, col) { fg } else { bg };
            raster.pixels[y * size + x] = colour;
        }
    }
    raster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RowColours;

    #[test]
    fn test_blit_clips() {
        let mut dest = Raster::filled(3, 3, Colour::BLACK);
        let source = Raster::filled(2, 2, Colour::WHITE);
        dest.blit(&source, 2, 2);
        assert_eq!(dest.get(2, 2), Some(Colour::WHITE));
        assert_eq!(dest.get(1, 1), Some(Colour::BLACK));
        assert_eq!(dest.get(3, 3), None);
    }

    #[test]
    fn test_scaled() {
        let mut raster = Raster::filled(2, 1, Colour::BLACK);
        raster.set(1, 0, Colour::WHITE);
        let scaled = raster.scaled(2);
        assert_eq!(scaled.size(), (4, 2));
        assert_eq!(scaled.get(1, 1), Some(Colour::BLACK));
        assert_eq!(scaled.get(2, 0), Some(Colour::WHITE));
        assert_eq!(raster.scaled(0), raster);
    }

    #[test]
    fn test_rows() {
        let raster = Raster::filled(2, 3, Colour::BLACK);
        assert_eq!(raster.rows().count(), 3);
        assert_eq!(Raster::transparent(0, 0).rows().count(), 0);
    }

    #[test]
    fn test_rasterize_blank_tile_is_background() {
        let palette = Palette::default();
        let raster = rasterize_tile(&Tile::blank(), &palette, 8);
        assert!(raster.is_flat());
        assert_eq!(raster.get(0, 0), palette.display(RowColours::DEFAULT.bg));
    }

    #[test]
    fn test_rasterize_uses_row_colours() {
        let palette = Palette::default();
        let mut tile = Tile::blank();
        tile.set_pixel(0, 0, true).unwrap();
        tile.set_row_colours(0, 8, 4).unwrap();

        let raster = rasterize_tile(&tile, &palette, 16);
        assert_eq!(raster.size(), (16, 16));
        assert_eq!(raster.get(0, 0), palette.display(8));
        assert_eq!(raster.get(1, 1), palette.display(8));
        assert_eq!(raster.get(2, 0), palette.display(4));
        assert_eq!(raster.get(0, 2), palette.display(RowColours::DEFAULT.bg));
    }

    #[test]
    fn test_rasterize_downsampled() {
        let palette = Palette::default();
        let mut tile = Tile::blank();
        tile.set_pixel(4, 4, true).unwrap();
        let raster = rasterize_tile(&tile, &palette, 4);
        assert_eq!(raster.get(2, 2), palette.display(RowColours::DEFAULT.fg));
        assert_eq!(raster.get(1, 1), palette.display(RowColours::DEFAULT.bg));
    }
}
