//! Configuration for SVG rendering

/// Default card width in pixels
pub const DEFAULT_WIDTH: u32 = 1200;

/// Default card height in pixels
pub const DEFAULT_HEIGHT: u32 = 800;

/// Default font stack for all text layers
pub const DEFAULT_FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Configuration options for SVG output
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Drawing surface width in pixels
    pub width: u32,

    /// Drawing surface height in pixels
    pub height: u32,

    /// Font family applied to every text layer
    pub font_family: String,

    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "eqsl-" for "eqsl-layer")
    pub class_prefix: Option<String>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            standalone: true,
            pretty_print: true,
            class_prefix: Some("eqsl-".to_string()),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the font family
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert_eq!(config.width, 1200);
        assert_eq!(config.height, 800);
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("eqsl-".to_string()));
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_size(600, 400)
            .with_font_family("Serif")
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-");

        assert_eq!((config.width, config.height), (600, 400));
        assert_eq!(config.font_family, "Serif");
        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.without_class_prefix().class_prefix, None);
    }
}
