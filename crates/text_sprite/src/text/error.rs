//! Errors reported by text sprite operations

use super::font_cache::FontError;

/// Result type for text sprite operations
pub type TextResult<T> = Result<T, TextError>;

/// Errors that reject a text format change
///
/// A rejected change leaves the sprite exactly as it was.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Malformed argument, such as an unknown alignment name
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The glyph cache could not provide the requested font
    #[error("Failed to resolve font '{font}' at {size}px: {source}")]
    FontResolution {
        /// Requested font identifier
        font: String,
        /// Requested pixel size
        size: u32,
        /// Underlying cache error
        #[source]
        source: FontError,
    },
}
