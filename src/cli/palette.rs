//! Palette command implementation.
//!
//! Prints the 16 slots of a project's palette, or builds a palette file from
//! the most frequent colours of a PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::codec::{decode_palette, encode_palette};
use crate::error::{Result, TileforgeError};
use crate::output::{display_path, plural, Printer};
use crate::project::{Component, ProjectPaths};
use crate::render::read_png_colours;
use crate::types::Palette;
use crate::validation::{print_diagnostics, Diagnostics};

/// Print a project's palette or import one from a PNG
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Any of the project's files, or its base path
    #[arg(required_unless_present = "from_png")]
    pub project: Option<PathBuf>,

    /// PNG to sample colours from
    #[arg(long, conflicts_with = "project")]
    pub from_png: Option<PathBuf>,

    /// Palette file to write (default: the PNG path with .msxpal)
    #[arg(long, requires = "from_png")]
    pub out: Option<PathBuf>,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let mut diagnostics = Diagnostics::new();

    let palette = match (&args.from_png, &args.project) {
        (Some(png), _) => {
            let out = args
                .out
                .clone()
                .unwrap_or_else(|| png.with_extension(Component::Palette.extension()));
            let palette = import_png(png, &out, &mut diagnostics)?;
            printer.success("Wrote", &display_path(&out));
            palette
        }
        (None, Some(project)) => load(project, &mut diagnostics)?,
        (None, None) => {
            return Err(TileforgeError::Config {
                message: "no project or --from-png given".to_string(),
                help: Some("tileforge palette <project> or tileforge palette --from-png <image>".to_string()),
            })
        }
    };

    print_diagnostics(printer, &diagnostics);
    for line in listing(&palette) {
        println!("{}", line);
    }
    Ok(())
}

/// Sample up to 16 colours from `png` and write them to `out` as a palette file.
pub fn import_png(png: &Path, out: &Path, diagnostics: &mut Diagnostics) -> Result<Palette> {
    let colours = read_png_colours(png)?;
    log::info!(
        "sampled {} from {}",
        plural(colours.len(), "colour", "colours"),
        png.display()
    );

    let palette = Palette::from_display_colours(&colours, diagnostics);
    fs::write(out, encode_palette(&palette)).map_err(|e| TileforgeError::Io {
        path: out.to_path_buf(),
        message: format!("Failed to write palette: {}", e),
    })?;
    Ok(palette)
}

fn load(project: &Path, diagnostics: &mut Diagnostics) -> Result<Palette> {
    let path = ProjectPaths::resolve(project).path(Component::Palette);
    let bytes = fs::read(&path).map_err(|e| TileforgeError::Io {
        path: path.clone(),
        message: format!("Failed to read palette: {}", e),
    })?;
    decode_palette(&bytes, diagnostics).map_err(|source| TileforgeError::DecodeFile { path, source })
}

/// One line per slot: index, channel levels and display colour.
pub fn listing(palette: &Palette) -> Vec<String> {
    palette
        .colours()
        .iter()
        .enumerate()
        .map(|(slot, c)| format!("{:>2}: {} {} {}  {}", slot, c.r, c.g, c.b, c.to_colour()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Colour, Rgb7};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    #[test]
    fn test_listing() {
        let mut palette = Palette::default();
        palette.set(3, Rgb7::new(1, 2, 3)).unwrap();
        let lines = listing(&palette);
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[3], " 3: 1 2 3  #24486c");
    }

    #[test]
    fn test_import_png() {
        let dir = tempdir().unwrap();
        let png = dir.path().join("swatch.png");

        // three red pixels, one canonical blue, one off-grid grey
        let mut img = RgbaImage::new(5, 1);
        for x in 0..3 {
            img.put_pixel(x, 0, Rgba([252, 0, 0, 255]));
        }
        img.put_pixel(3, 0, Rgba([0, 0, 108, 255]));
        img.put_pixel(4, 0, Rgba([100, 100, 100, 255]));
        img.save(&png).unwrap();

        let out = dir.path().join("swatch.msxpal");
        let mut diagnostics = Diagnostics::new();
        let palette = import_png(&png, &out, &mut diagnostics).unwrap();

        assert_eq!(palette.get(0).unwrap(), Rgb7::new(7, 0, 0));
        assert_eq!(palette.get(1).unwrap(), Rgb7::new(0, 0, 3));
        assert_eq!(palette.get(2).unwrap().to_colour(), Colour::BLACK);
        assert_eq!(diagnostics.warning_count(), 1);

        let written = fs::read(&out).unwrap();
        let reloaded = decode_palette(&written, &mut Diagnostics::new()).unwrap();
        assert_eq!(reloaded, palette);
    }

    #[test]
    fn test_load_from_project_file() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("level");
        let palette = Palette::default();
        fs::write(base.with_extension("msxpal"), encode_palette(&palette)).unwrap();

        let loaded = load(&base.with_extension("SC4Map"), &mut Diagnostics::new()).unwrap();
        assert_eq!(loaded, palette);
    }
}
