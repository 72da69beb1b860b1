//! Font style types

use super::Color;
use crate::codec::attribute_enum;

attribute_enum! {
    /// Underline style (`u val="..."`)
    pub enum UnderlineType ("underline") {
        /// Attribute omitted
        Unset,
        Single => "single",
        Double => "double",
        SingleAccounting => "singleAccounting",
        DoubleAccounting => "doubleAccounting",
        /// Explicitly no underline
        NoUnderline => "none",
    }
}

/// Font settings
///
/// Fields left at `None`/unset are inherited from the cell's named style.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Font {
    /// Font family name (e.g., "Calibri", "Arial")
    pub name: Option<String>,
    /// Font size in points
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: UnderlineType,
    pub color: Option<Color>,
}

impl Font {
    /// Family of the workbook's standard font
    pub const DEFAULT_NAME: &'static str = "Calibri";

    /// Size of the workbook's standard font
    pub const DEFAULT_SIZE: f64 = 11.0;

    /// Create a font with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// The workbook's standard font (Calibri 11)
    pub fn standard() -> Self {
        Self::new()
            .with_name(Self::DEFAULT_NAME)
            .with_size(Self::DEFAULT_SIZE)
    }

    /// Set font name
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set font size
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set bold
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Set underline
    pub fn with_underline(mut self, underline: UnderlineType) -> Self {
        self.underline = underline;
        self
    }

    /// Set color
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl std::hash::Hash for Font {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.size.map(f64::to_bits).hash(state);
        self.bold.hash(state);
        self.italic.hash(state);
        self.strikethrough.hash(state);
        self.underline.hash(state);
        self.color.hash(state);
    }
}

impl Eq for Font {}
