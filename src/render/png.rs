//! PNG input and output.
//!
//! Writes rasters as PNG files with optional integer scaling, and reads the
//! distinct colours of a PNG for palette import.

use std::collections::HashMap;
use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, TileforgeError};
use crate::types::Colour;

use super::Raster;

/// Write a raster to a PNG file.
///
/// # Arguments
///
/// * `raster` - The raster to write
/// * `path` - Output file path
/// * `scale` - Integer scale factor (1 = no scaling)
pub fn write_png(raster: &Raster, path: &Path, scale: u32) -> Result<()> {
    let scale = scale.max(1); // Minimum scale of 1

    if raster.width() == 0 || raster.height() == 0 {
        return Err(TileforgeError::Render {
            message: format!("Refusing to write an empty image to {}", path.display()),
            help: None,
        });
    }

    let width = raster.width() as u32 * scale;
    let height = raster.height() as u32 * scale;

    let mut img: RgbaImage = ImageBuffer::new(width, height);

    for (y, row) in raster.rows().enumerate() {
        for (x, colour) in row.iter().enumerate() {
            let rgba = Rgba(colour.to_rgba());

            // Fill scaled pixels
            for sy in 0..scale {
                for sx in 0..scale {
                    let px = x as u32 * scale + sx;
                    let py = y as u32 * scale + sy;
                    img.put_pixel(px, py, rgba);
                }
            }
        }
    }

    img.save(path).map_err(|e| TileforgeError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    log::debug!("wrote {}x{} PNG to {}", width, height, path.display());
    Ok(())
}

/// Distinct opaque colours of an image, most frequent first.
///
/// Ties keep the order in which the colours first appear (row-major).
/// Pixels with any transparency are ignored.
pub fn read_png_colours(path: &Path) -> Result<Vec<Colour>> {
    let img = image::open(path)
        .map_err(|e| TileforgeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read image: {}", e),
        })?
        .to_rgba8();

    let mut counts: HashMap<Colour, (usize, usize)> = HashMap::new();
    for pixel in img.pixels() {
        let [r, g, b, a] = pixel.0;
        if a != 255 {
            continue;
        }
        let next = counts.len();
        counts.entry(Colour::rgb(r, g, b)).or_insert((0, next)).0 += 1;
    }

    let mut colours: Vec<(Colour, (usize, usize))> = counts.into_iter().collect();
    colours.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });
    Ok(colours.into_iter().map(|(colour, _)| colour).collect())
}
