//! # gridmark
//!
//! Structural parts of a spreadsheet document: hyperlinks, conditional
//! formatting and the shared style registry, with their SpreadsheetML
//! markup.
//!
//! ## Features
//!
//! - Rectangular regions with overlap arithmetic
//! - Non-overlapping hyperlinks with deduplicated relationships
//! - Conditional formatting rules validated before they are written
//! - One deduplicating style registry per workbook
//! - Strict markup codec for every enumeration attribute
//!
//! ## Example
//!
//! ```rust
//! use gridmark::prelude::*;
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Link a range and style its cells
//! sheet
//!     .set_hyperlink(Bounds::parse("A1:B2").unwrap(), "https://example.com")
//!     .unwrap();
//!
//! // Highlight the top three values
//! let top = ConditionalFormatting::new()
//!     .with_bounds(Bounds::parse("C1:C20").unwrap())
//!     .with_rule(RuleInfo::new([
//!         rules::Top::rank(3),
//!         rules::Top::items(),
//!         rules::Top::styles(Style::new().bold(true)),
//!     ]));
//! sheet.add_conditional_formatting(top).unwrap();
//!
//! let markup = sheet.write_markup().unwrap();
//! assert!(markup.body.contains("<hyperlinks>"));
//! assert!(markup.rels.is_some());
//! ```

pub mod prelude;

// Re-export core types
pub use gridmark_core::conditional::rules;
pub use gridmark_core::{
    // Regions
    to_indexes,
    AttributeEnum,
    Bounds,
    CellAddress,
    CellStyles,

    // Styles
    Color,
    // Conditional formatting
    ConditionOperator,
    ConditionType,
    ConditionValueType,
    ConditionalFormatting,
    ConditionalRule,
    // Error types
    Error,
    Font,
    // Hyperlinks
    Hyperlink,
    HyperlinkInfo,
    HyperlinkTarget,
    Hyperlinks,
    IconSetType,
    Link,
    NamedStyle,
    // Relationships
    PartRelationships,
    Relationship,
    RelationshipId,
    RelationshipType,
    Relationships,

    Result,
    RuleInfo,
    RuleKind,
    RuleOption,
    RuleVariant,
    SharedStyles,
    Style,
    StyleId,
    StyleRef,
    StyleRegistry,
    TargetMode,
    TimePeriod,
    UnderlineType,
    ValueObject,
    // Main types
    Workbook,
    WorkbookSettings,
    Worksheet,

    EXCEL_HYPERLINK_LIMIT,
    MAX_COLS,
    // Constants
    MAX_ROWS,
    MAX_SHEET_NAME_LEN,
};
pub use gridmark_core::conditional::rules::{AverageOptions, RankOptions};

// Re-export markup types
pub use gridmark_xlsx::{
    read_conditional_formatting, read_hyperlinks, read_relationships,
    write_conditional_formatting, write_hyperlinks, write_relationships, XlsxError, XlsxResult,
};

/// Markup of one worksheet's structural parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetMarkup {
    /// `<conditionalFormatting>` blocks then `<hyperlinks>`, ready to be
    /// placed after `<sheetData>`
    pub body: String,
    /// The sheet's relationships part, if it has one
    pub rels: Option<String>,
}

/// Extension trait for Worksheet to add markup I/O
pub trait WorksheetMarkupExt {
    /// Write the structural parts of the sheet
    fn write_markup(&self) -> XlsxResult<SheetMarkup>;

    /// Load the structural parts of the sheet from its markup
    fn load_markup(&mut self, sheet_xml: &str, rels_xml: Option<&str>) -> XlsxResult<()>;
}

impl WorksheetMarkupExt for Worksheet {
    fn write_markup(&self) -> XlsxResult<SheetMarkup> {
        Ok(SheetMarkup {
            body: gridmark_xlsx::write_worksheet_fragments(self)?,
            rels: gridmark_xlsx::write_worksheet_rels(self),
        })
    }

    fn load_markup(&mut self, sheet_xml: &str, rels_xml: Option<&str>) -> XlsxResult<()> {
        gridmark_xlsx::load_worksheet(self, sheet_xml, rels_xml)
    }
}
