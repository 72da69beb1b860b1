//! # gridmark-core
//!
//! Document model core for the gridmark spreadsheet library.
//!
//! This crate keeps the structural parts of a loaded document consistent:
//! - [`Bounds`] and [`CellAddress`] - Rectangular regions and A1 references
//! - [`AttributeEnum`] - Closed enumerations encoded as fixed markup tokens
//! - [`StyleRegistry`] - Deduplicated style definitions shared by a workbook
//! - [`Relationships`] - Per-part relationship table
//! - [`Hyperlinks`] - Non-overlapping hyperlinks of one worksheet
//! - [`RuleInfo`] - Validated conditional formatting rules
//!
//! ## Example
//!
//! ```rust
//! use gridmark_core::{Bounds, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! sheet
//!     .set_hyperlink(Bounds::from_cell(0, 0), "https://example.com")
//!     .unwrap();
//!
//! let info = sheet.hyperlink("A1").unwrap().unwrap();
//! assert_eq!(info.target().raw(), "https://example.com");
//! ```

pub mod bounds;
pub mod cell;
pub mod codec;
pub mod conditional;
pub mod error;
pub mod hyperlink;
pub mod relationships;
pub mod style;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use bounds::Bounds;
pub use cell::{to_indexes, CellAddress};
pub use codec::AttributeEnum;
pub use conditional::{
    ConditionOperator, ConditionType, ConditionValueType, ConditionalFormatting,
    ConditionalRule, IconSetType, RuleInfo, RuleKind, RuleOption, RuleVariant, TimePeriod,
    ValueObject,
};
pub use error::{Error, Result};
pub use hyperlink::{
    CellStyles, Hyperlink, HyperlinkInfo, HyperlinkTarget, Hyperlinks, Link,
    EXCEL_HYPERLINK_LIMIT,
};
pub use relationships::{
    PartRelationships, Relationship, RelationshipId, RelationshipType, Relationships, TargetMode,
};
pub use style::{
    Color, Font, NamedStyle, SharedStyles, Style, StyleId, StyleRef, StyleRegistry,
    UnderlineType,
};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;
