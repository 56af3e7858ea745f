//! Error types for palette operations

use thiserror::Error;

/// Error type for strict hex color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string does not have six digits after stripping '#'
    #[error("invalid hex color length {0} (expected 6 characters)")]
    InvalidLength(usize),
    /// Non-hexadecimal character encountered
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// Error type for palette construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// A palette needs at least one color to map pixels onto
    #[error("palette cannot be empty")]
    Empty,
    /// Grid cells index the palette with a `u8`
    #[error("palette has {0} colors (max {max})", max = super::MAX_PALETTE_SIZE)]
    TooLarge(usize),
    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_error_messages() {
        assert_eq!(
            ParseColorError::InvalidLength(3).to_string(),
            "invalid hex color length 3 (expected 6 characters)"
        );
        assert_eq!(
            ParseColorError::InvalidHex("zz0000".into()).to_string(),
            "invalid hex color: zz0000"
        );
    }

    #[test]
    fn test_palette_error_messages() {
        assert_eq!(PaletteError::Empty.to_string(), "palette cannot be empty");
        assert_eq!(
            PaletteError::TooLarge(300).to_string(),
            "palette has 300 colors (max 256)"
        );
    }

    #[test]
    fn test_palette_error_from_parse_error() {
        let err: PaletteError = ParseColorError::InvalidLength(2).into();
        assert!(matches!(err, PaletteError::ParseColor(_)));
    }
}
