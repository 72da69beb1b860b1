//! Color representation

use std::fmt;

/// Color of a font or fill
///
/// Only what the markup can reference directly: an RGB value, a theme
/// slot with tint, or an entry of the legacy indexed palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    /// Opaque RGB color
    Rgb { r: u8, g: u8, b: u8 },

    /// Theme color with tint (-100..=100 percent)
    Theme { index: u8, tint: i8 },

    /// Indexed color (legacy palette)
    Indexed(u8),
}

impl Color {
    /// Default hyperlink font color (#0563C1)
    pub const HYPERLINK: Color = Color::rgb(0x05, 0x63, 0xC1);

    /// Followed hyperlink font color (#954F72)
    pub const FOLLOWED_HYPERLINK: Color = Color::rgb(0x95, 0x4F, 0x72);

    /// Create an RGB color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    /// Create a theme color
    pub const fn theme(index: u8, tint: i8) -> Self {
        Color::Theme { index, tint }
    }

    /// Parse "#RRGGBB", "RRGGBB" or "AARRGGBB" (alpha is dropped)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let rgb = match hex.len() {
            6 => hex,
            8 => hex.get(2..)?,
            _ => return None,
        };

        let channel = |i: usize| u8::from_str_radix(rgb.get(i..i + 2)?, 16).ok();
        Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// ARGB hex string as used by the markup (e.g. "FF0563C1")
    ///
    /// Theme and indexed colors have no fixed RGB value and return `None`.
    pub fn to_argb_hex(&self) -> Option<String> {
        match self {
            Color::Rgb { r, g, b } => Some(format!("FF{:02X}{:02X}{:02X}", r, g, b)),
            Color::Theme { .. } | Color::Indexed(_) => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb { r, g, b } => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
            Color::Theme { index, tint } => write!(f, "theme({}, {})", index, tint),
            Color::Indexed(i) => write!(f, "indexed({})", i),
        }
    }
}
