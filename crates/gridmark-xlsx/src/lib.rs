//! # gridmark-xlsx
//!
//! SpreadsheetML markup for the structural parts of a gridmark worksheet:
//! the relationships part, `<hyperlinks>` and `<conditionalFormatting>`.
//!
//! Package handling (ZIP entries, content types, the styles part) is left
//! to the caller; this crate only turns model state into markup and back.
//!
//! ```rust
//! use gridmark_core::{Bounds, Workbook};
//! use gridmark_xlsx::{read_hyperlinks, write_hyperlinks};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.add_hyperlink(Bounds::parse("A1").unwrap(), "https://example.com").unwrap();
//!
//! let xml = write_hyperlinks(sheet.hyperlinks());
//! let links = read_hyperlinks(&xml).unwrap();
//! assert_eq!(links[0].rid.as_ref().unwrap().as_str(), "rId1");
//! ```

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::{
    load_worksheet, read_conditional_formatting, read_hyperlinks, read_relationships,
};
pub use writer::{
    write_conditional_formatting, write_hyperlinks, write_relationships,
    write_worksheet_fragments, write_worksheet_rels,
};
