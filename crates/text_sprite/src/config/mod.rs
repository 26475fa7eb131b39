//! Configuration system
//!
//! File-backed configuration (TOML or RON, chosen by extension) plus the
//! defaults every text sprite starts from.

pub use serde::{Serialize, Deserialize};

use crate::foundation::color::Color;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        Self::from_str_with_format(&contents, path)
    }

    /// Parse configuration text, using `path` only to pick the format
    fn from_str_with_format(contents: &str, path: &str) -> Result<Self, ConfigError> {
        if path.ends_with(".toml") {
            toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but are not usable
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Identifier of the pixel font compiled into the crate
pub const EMBEDDED_FONT_ID: &str = "nokiafc22";

/// # Text Sprite Configuration
///
/// Defaults applied when a text sprite is constructed and when a format
/// update leaves a field unspecified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font used when the sprite is built with the embedded font
    pub embedded_font: String,
    /// Font used when the sprite is built without the embedded font
    pub default_font: String,
    /// Pixel size applied when a format update omits it
    pub default_size: u32,
    /// Foreground color applied when a format update omits it
    pub default_color: Color,
    /// Shadow offset applied when a format update omits it
    pub default_shadow_offset: (f32, f32),
    /// Added to the measured layout height before rounding up
    pub height_padding: f32,
    /// Offset of the first glyph from the sprite's draw position
    pub layout_inset: (f32, f32),
}

impl TextConfig {
    /// Create a configuration with the stock defaults
    pub fn new() -> Self {
        Self {
            embedded_font: EMBEDDED_FONT_ID.to_string(),
            default_font: EMBEDDED_FONT_ID.to_string(),
            default_size: 8,
            default_color: Color(0x00FF_FFFF),
            default_shadow_offset: (1.0, 1.0),
            height_padding: 7.0,
            layout_inset: (2.0, 3.0),
        }
    }

    /// Set the font used for non-embedded construction
    pub fn with_default_font(mut self, font: impl Into<String>) -> Self {
        self.default_font = font.into();
        self
    }

    /// Set the default pixel size
    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = size;
        self
    }

    /// Set the height padding
    pub fn with_height_padding(mut self, padding: f32) -> Self {
        self.height_padding = padding;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.embedded_font.is_empty() || self.default_font.is_empty() {
            return Err(ConfigError::Invalid("font identifiers cannot be empty".to_string()));
        }

        if self.default_size == 0 {
            return Err(ConfigError::Invalid("default size must be at least 1".to_string()));
        }

        if self.height_padding < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "height padding must not be negative, got {}",
                self.height_padding
            )));
        }

        Ok(())
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for TextConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TextConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_size, 8);
        assert_eq!(config.height_padding, 7.0);
        assert_eq!(config.layout_inset, (2.0, 3.0));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(TextConfig::new().with_default_size(0).validate().is_err());
        assert!(TextConfig::new().with_default_font("").validate().is_err());
        assert!(TextConfig::new().with_height_padding(-1.0).validate().is_err());
    }

    #[test]
    fn test_toml_partial_overrides_keep_defaults() {
        let config = TextConfig::from_str_with_format(
            "default_size = 16\ndefault_font = \"arcade\"\n",
            "text.toml",
        )
        .unwrap();

        assert_eq!(config.default_size, 16);
        assert_eq!(config.default_font, "arcade");
        assert_eq!(config.embedded_font, EMBEDDED_FONT_ID);
        assert_eq!(config.height_padding, 7.0);
    }

    #[test]
    fn test_ron_parse() {
        let config = TextConfig::from_str_with_format("(height_padding: 4.0)", "text.ron").unwrap();
        assert_eq!(config.height_padding, 4.0);
        assert_eq!(config.default_size, 8);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = TextConfig::from_str_with_format("", "text.json");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
