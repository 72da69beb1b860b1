//! Error types for gridmark-core

use crate::bounds::Bounds;
use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridmark-core
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Invalid cell reference (e.g. "A0", "1A", "")
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid bounds notation
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Hyperlink argument could not be turned into a target
    #[error("Unsupported hyperlink: {0}")]
    InvalidLinkShape(String),

    /// Hyperlink bounds intersect a different hyperlink
    #[error("Intersection of different hyperlinks is not allowed, {existing} intersects with {requested}")]
    OverlapConflict { existing: Bounds, requested: Bounds },

    /// Too many hyperlinks on one worksheet
    #[error("Exceeds limit ({0}) for total number of hyperlinks per worksheet")]
    LimitExceeded(usize),

    /// Attribute token that does not belong to the enumeration
    #[error("Unrecognized {kind} token: '{token}'")]
    UnrecognizedToken { kind: &'static str, token: String },

    /// Conditional rule is incomplete
    #[error("{rule} rule is missing required field '{field}'")]
    MissingRequiredField {
        rule: &'static str,
        field: &'static str,
    },

    /// Markup can only be loaded into a sheet that has no parts yet
    #[error("Worksheet '{0}' already has hyperlinks, relationships or conditional formatting")]
    SheetNotEmpty(String),

    /// Invalid sheet name
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Duplicate sheet name
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}

impl Error {
    pub(crate) fn missing(rule: &'static str, field: &'static str) -> Self {
        Error::MissingRequiredField { rule, field }
    }
}
