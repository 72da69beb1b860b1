//! Cell styling types
//!
//! This module contains:
//! - [`Style`] - A complete style definition
//! - [`Font`] / [`UnderlineType`] - Font settings
//! - [`Color`] - Color representation
//! - [`NamedStyle`] - Built-in style categories
//! - [`StyleRegistry`] - Deduplicating store handing out [`StyleRef`]s

mod color;
mod font;
mod named;
mod registry;

pub use color::Color;
pub use font::{Font, UnderlineType};
pub use named::NamedStyle;
pub use registry::{SharedStyles, StyleId, StyleRef, StyleRegistry};

/// A style definition
///
/// Two definitions with equal content are the same style; the
/// [`StyleRegistry`] stores each of them once.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
    /// Named style category this definition belongs to
    pub named_style: Option<NamedStyle>,
    /// Font settings
    pub font: Font,
    /// Solid fill color
    pub fill: Option<Color>,
    /// Number format code
    pub number_format: Option<String>,
}

impl Style {
    /// Create an empty definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the definition to a named style category
    pub fn named(mut self, category: NamedStyle) -> Self {
        self.named_style = Some(category);
        self
    }

    /// Replace the font settings
    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Set font to bold
    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Set font to italic
    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    /// Set underline style
    pub fn underline(mut self, underline: UnderlineType) -> Self {
        self.font.underline = underline;
        self
    }

    /// Set font name
    pub fn font_name<S: Into<String>>(mut self, name: S) -> Self {
        self.font.name = Some(name.into());
        self
    }

    /// Set font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = Some(size);
        self
    }

    /// Set font color
    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = Some(color);
        self
    }

    /// Set fill color (solid fill)
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    /// Set number format string
    pub fn number_format<S: Into<String>>(mut self, format: S) -> Self {
        self.number_format = Some(format.into());
        self
    }
}

impl std::hash::Hash for Style {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.named_style.hash(state);
        self.font.hash(state);
        self.fill.hash(state);
        self.number_format.hash(state);
    }
}

impl Eq for Style {}
