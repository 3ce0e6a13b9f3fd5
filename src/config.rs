//! Editor configuration loaded from TOML
//!
//! Everything here has a default, so an empty file (or no file at all) gives
//! a 1200x800 card rendered with system fonts at 1:1 scale.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::renderer::config::{DEFAULT_FONT_FAMILY, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::renderer::SvgConfig;

/// Errors that can occur when loading or parsing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Settings for one editing session
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Font family used for every text layer
    pub font_family: String,
    /// Extra directories scanned for fonts when rasterizing
    pub font_dirs: Vec<PathBuf>,
    /// Whether system fonts are loaded when rasterizing
    pub system_fonts: bool,
    /// Pixel ratio of PNG exports
    pub export_scale: f32,
}

/// TOML structure for deserializing configuration
#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlConfig {
    canvas: TomlCanvas,
    fonts: TomlFonts,
    export: TomlExport,
}

#[derive(Deserialize)]
#[serde(default)]
struct TomlCanvas {
    width: u32,
    height: u32,
}

impl Default for TomlCanvas {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct TomlFonts {
    family: String,
    dirs: Vec<PathBuf>,
    system: bool,
}

impl Default for TomlFonts {
    fn default() -> Self {
        Self {
            family: DEFAULT_FONT_FAMILY.to_string(),
            dirs: vec![],
            system: true,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct TomlExport {
    scale: f32,
}

impl Default for TomlExport {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl EditorConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;

        let config = EditorConfig {
            width: parsed.canvas.width,
            height: parsed.canvas.height,
            font_family: parsed.fonts.family,
            font_dirs: parsed.fonts.dirs,
            system_fonts: parsed.fonts.system,
            export_scale: parsed.export.scale,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject an empty canvas or a non-positive export scale
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must not be empty (got {}x{})",
                self.width, self.height
            )));
        }
        if !(self.export_scale.is_finite() && self.export_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "export scale must be positive (got {})",
                self.export_scale
            )));
        }
        Ok(())
    }

    /// Set the PNG export pixel ratio
    pub fn with_export_scale(mut self, scale: f32) -> Self {
        self.export_scale = scale;
        self
    }

    /// Compositor settings derived from this configuration
    pub fn svg_config(&self) -> SvgConfig {
        SvgConfig::new()
            .with_size(self.width, self.height)
            .with_font_family(self.font_family.clone())
    }

    /// Canvas size as floating point, for geometry
    pub fn canvas(&self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        let toml = TomlConfig::default();
        EditorConfig {
            width: toml.canvas.width,
            height: toml.canvas.height,
            font_family: toml.fonts.family,
            font_dirs: toml.fonts.dirs,
            system_fonts: toml.fonts.system,
            export_scale: toml.export.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!((config.width, config.height), (1200, 800));
        assert!(config.system_fonts);
        assert!(config.font_dirs.is_empty());
        assert_eq!(config.export_scale, 1.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EditorConfig::from_str("").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[canvas]
width = 900

[fonts]
family = "Liberation Sans"
dirs = ["fonts"]
system = false

[export]
scale = 2.0
"#;
        let config = EditorConfig::from_str(toml_str).expect("Should parse");
        assert_eq!(config.width, 900);
        assert_eq!(config.height, 800);
        assert_eq!(config.font_family, "Liberation Sans");
        assert_eq!(config.font_dirs, vec![PathBuf::from("fonts")]);
        assert!(!config.system_fonts);
        assert_eq!(config.export_scale, 2.0);
        assert_eq!(config.svg_config().width, 900);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            EditorConfig::from_str("[export]\nscale = 0.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            EditorConfig::from_str("[canvas]\nwidth = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        let invalid = "this is not valid toml {{{{";
        assert!(matches!(
            EditorConfig::from_str(invalid),
            Err(ConfigError::ParseError(_))
        ));
    }
}
