//! Workbook type - the open document

use crate::error::{Error, Result};
use crate::hyperlink::EXCEL_HYPERLINK_LIMIT;
use crate::style::{SharedStyles, StyleRegistry};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// Characters a sheet name may not contain
const FORBIDDEN_NAME_CHARS: [char; 7] = [':', '\\', '/', '?', '*', '[', ']'];

/// A workbook (spreadsheet document)
///
/// The workbook owns the style registry. Every worksheet it creates holds a
/// handle to that same registry, so equal styles are stored once per
/// document.
#[derive(Debug)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    styles: SharedStyles,
    settings: WorkbookSettings,
}

impl Workbook {
    /// Create a new workbook with one worksheet named "Sheet1"
    pub fn new() -> Self {
        Self::with_settings(WorkbookSettings::default())
    }

    /// Create a new workbook with one worksheet and custom settings
    pub fn with_settings(settings: WorkbookSettings) -> Self {
        let styles = StyleRegistry::shared();
        let first = Worksheet::new("Sheet1", styles.clone(), &settings);
        Self {
            worksheets: vec![first],
            styles,
            settings,
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Add a worksheet named "SheetN" after the first free N
    pub fn add_worksheet(&mut self) -> Result<usize> {
        let name = (self.worksheets.len() + 1..)
            .map(|n| format!("Sheet{}", n))
            .find(|name| !self.has_sheet(name))
            .ok_or_else(|| Error::InvalidSheetName("no free default name".into()))?;
        self.add_worksheet_with_name(&name)
    }

    /// Add a worksheet sharing this workbook's registry and settings
    ///
    /// Names are compared case-insensitively.
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        if name.is_empty() || name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "'{}' must have 1 to {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| FORBIDDEN_NAME_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!("'{}' contains '{}'", name, c)));
        }
        if self.has_sheet(name) {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        self.worksheets
            .push(Worksheet::new(name, self.styles.clone(), &self.settings));
        Ok(self.worksheets.len() - 1)
    }

    fn has_sheet(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == name)
    }

    /// Get the style registry of the document
    pub fn styles(&self) -> &SharedStyles {
        &self.styles
    }

    pub fn settings(&self) -> &WorkbookSettings {
        &self.settings
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

/// Workbook-level settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorkbookSettings {
    /// Maximum number of hyperlinks per worksheet
    pub hyperlink_limit: usize,
}

impl Default for WorkbookSettings {
    fn default() -> Self {
        Self {
            hyperlink_limit: EXCEL_HYPERLINK_LIMIT,
        }
    }
}

impl WorkbookSettings {
    pub fn with_hyperlink_limit(mut self, limit: usize) -> Self {
        self.hyperlink_limit = limit;
        self
    }
}
