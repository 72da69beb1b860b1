//! Built-in named style categories

use super::{Color, Font, Style, UnderlineType};

/// Built-in cell style category recognized by the format's style system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NamedStyle {
    Normal,
    Hyperlink,
    FollowedHyperlink,
    Good,
    Bad,
    Neutral,
    Title,
    Heading1,
    Note,
    Total,
}

impl NamedStyle {
    /// Display name written to `cellStyle name="..."`
    pub fn name(&self) -> &'static str {
        match self {
            NamedStyle::Normal => "Normal",
            NamedStyle::Hyperlink => "Hyperlink",
            NamedStyle::FollowedHyperlink => "Followed Hyperlink",
            NamedStyle::Good => "Good",
            NamedStyle::Bad => "Bad",
            NamedStyle::Neutral => "Neutral",
            NamedStyle::Title => "Title",
            NamedStyle::Heading1 => "Heading 1",
            NamedStyle::Note => "Note",
            NamedStyle::Total => "Total",
        }
    }

    /// Built-in style id (`cellStyle builtinId="..."`)
    pub fn builtin_id(&self) -> u32 {
        match self {
            NamedStyle::Normal => 0,
            NamedStyle::Hyperlink => 8,
            NamedStyle::FollowedHyperlink => 9,
            NamedStyle::Note => 10,
            NamedStyle::Title => 15,
            NamedStyle::Heading1 => 16,
            NamedStyle::Total => 25,
            NamedStyle::Good => 26,
            NamedStyle::Bad => 27,
            NamedStyle::Neutral => 28,
        }
    }

    /// The canonical definition registered for this category
    pub fn canonical_style(&self) -> Style {
        let base = Style::new().named(*self).font(Font::standard());
        match self {
            NamedStyle::Normal => base,
            NamedStyle::Hyperlink => base
                .underline(UnderlineType::Single)
                .font_color(Color::HYPERLINK),
            NamedStyle::FollowedHyperlink => base
                .underline(UnderlineType::Single)
                .font_color(Color::FOLLOWED_HYPERLINK),
            NamedStyle::Good => base
                .font_color(Color::rgb(0x00, 0x61, 0x00))
                .fill_color(Color::rgb(0xC6, 0xEF, 0xCE)),
            NamedStyle::Bad => base
                .font_color(Color::rgb(0x9C, 0x00, 0x06))
                .fill_color(Color::rgb(0xFF, 0xC7, 0xCE)),
            NamedStyle::Neutral => base
                .font_color(Color::rgb(0x9C, 0x57, 0x00))
                .fill_color(Color::rgb(0xFF, 0xEB, 0x9C)),
            NamedStyle::Title => base
                .font_name("Calibri Light")
                .font_size(18.0)
                .font_color(Color::theme(3, 0)),
            NamedStyle::Heading1 => base
                .bold(true)
                .font_size(15.0)
                .font_color(Color::theme(3, 0)),
            NamedStyle::Note => base.fill_color(Color::rgb(0xFF, 0xFF, 0xCC)),
            NamedStyle::Total => base.bold(true),
        }
    }
}
