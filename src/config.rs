//! Optional settings file (tileforge.yaml).
//!
//! Every field has a default, so an empty or absent file is valid. Command-line
//! flags override whatever is loaded here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TileforgeError};
use crate::render::MAX_TILE_SIZE;
use crate::store::{MAX_MAP_DIM, MIN_MAP_DIM};

/// Settings file name looked up next to a project.
pub const CONFIG_FILENAME: &str = "tileforge.yaml";

/// Render and project defaults loaded from tileforge.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output directory for rendered PNGs.
    pub output: PathBuf,

    /// Integer upscale applied when writing PNGs.
    pub scale: u32,

    /// Raster pixels per tile in map and sheet renders.
    pub tile_size: u32,

    /// Tiles per row in a tile sheet.
    pub sheet_columns: usize,

    /// Supertiles per row in a supertile sheet.
    pub supertile_columns: usize,

    /// Map width for new projects.
    pub map_width: usize,

    /// Map height for new projects.
    pub map_height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from("dist"),
            scale: 1,
            tile_size: 8,
            sheet_columns: 16,
            supertile_columns: 8,
            map_width: 32,
            map_height: 24,
        }
    }
}

impl Config {
    /// Load settings from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TileforgeError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse and validate settings from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null rather than an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| TileforgeError::Config {
            message: format!("Invalid {}: {}", CONFIG_FILENAME, e),
            help: Some(format!("Check {} syntax and key names", CONFIG_FILENAME)),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `explicit` if given, else tileforge.yaml from `dir` when it exists,
    /// else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            log::debug!("using {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject zero sizes, tiles larger than `MAX_TILE_SIZE` and map
    /// dimensions outside the supported range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("scale", self.scale as usize),
            ("tile_size", self.tile_size as usize),
            ("sheet_columns", self.sheet_columns),
            ("supertile_columns", self.supertile_columns),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(TileforgeError::Config {
                    message: format!("{} must be at least 1", key),
                    help: None,
                });
            }
        }

        if self.tile_size > MAX_TILE_SIZE {
            return Err(TileforgeError::Config {
                message: format!("tile_size {} is above {}", self.tile_size, MAX_TILE_SIZE),
                help: None,
            });
        }

        for (key, value) in [("map_width", self.map_width), ("map_height", self.map_height)] {
            if !(MIN_MAP_DIM..=MAX_MAP_DIM).contains(&value) {
                return Err(TileforgeError::Config {
                    message: format!("{} {} is outside {}..={}", key, value, MIN_MAP_DIM, MAX_MAP_DIM),
                    help: None,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = Config::parse("output: build\nscale: 4\n").unwrap();
        assert_eq!(config.output, PathBuf::from("build"));
        assert_eq!(config.scale, 4);
        assert_eq!(config.tile_size, 8);
        assert_eq!(config.map_width, 32);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
output: out/png
scale: 2
tile_size: 16
sheet_columns: 8
supertile_columns: 4
map_width: 64
map_height: 48
"#;
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.tile_size, 16);
        assert_eq!(config.sheet_columns, 8);
        assert_eq!(config.supertile_columns, 4);
        assert_eq!((config.map_width, config.map_height), (64, 48));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            Config::parse("shader: crt"),
            Err(TileforgeError::Config { .. })
        ));
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(matches!(
            Config::parse("scale: 0"),
            Err(TileforgeError::Config { .. })
        ));
    }

    #[test]
    fn test_tile_size_upper_bound() {
        assert!(Config::parse("tile_size: 256").is_ok());
        assert!(matches!(
            Config::parse("tile_size: 257"),
            Err(TileforgeError::Config { .. })
        ));
        assert!(Config::parse("tile_size: 2147483647").is_err());
    }

    #[test]
    fn test_map_dimension_rejected() {
        assert!(Config::parse("map_width: 0").is_err());
        assert!(Config::parse("map_height: 1025").is_err());
        assert!(Config::parse("map_height: 1024").is_ok());
    }

    #[test]
    fn test_discover() {
        let dir = tempdir().unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap(), Config::default());

        std::fs::write(dir.path().join(CONFIG_FILENAME), "tile_size: 4\n").unwrap();
        assert_eq!(Config::discover(None, dir.path()).unwrap().tile_size, 4);

        let other = dir.path().join("other.yaml");
        std::fs::write(&other, "tile_size: 2\n").unwrap();
        assert_eq!(Config::discover(Some(&other), dir.path()).unwrap().tile_size, 2);
    }
}
