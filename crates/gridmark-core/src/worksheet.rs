//! Worksheet type

use ahash::AHashMap;

use crate::bounds::Bounds;
use crate::cell::CellAddress;
use crate::conditional::ConditionalFormatting;
use crate::error::{Error, Result};
use crate::hyperlink::{CellStyles, Hyperlink, HyperlinkInfo, Hyperlinks, Link};
use crate::relationships::{PartRelationships, Relationships};
use crate::style::{SharedStyles, Style, StyleRef};
use crate::workbook::WorkbookSettings;
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
///
/// Created through [`Workbook`](crate::Workbook), which hands every sheet the
/// document's style registry.
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Style registry of the owning workbook
    styles: SharedStyles,
    /// Explicit cell styles keyed by (row, col)
    cell_styles: AHashMap<(u32, u16), StyleRef>,
    /// Styles set on whole ranges, newest last; cell entries take precedence
    range_styles: Vec<(Bounds, StyleRef)>,
    /// Relationships of the sheet part
    relationships: PartRelationships,
    /// Hyperlinks
    hyperlinks: Hyperlinks,
    /// Conditional formatting blocks
    conditional_formats: Vec<ConditionalFormatting>,
    /// Priority given to the next rule without one
    next_priority: u32,
}

impl Worksheet {
    pub(crate) fn new<S: Into<String>>(
        name: S,
        styles: SharedStyles,
        settings: &WorkbookSettings,
    ) -> Self {
        Self {
            name: name.into(),
            styles,
            cell_styles: AHashMap::new(),
            range_styles: Vec::new(),
            relationships: PartRelationships::new(),
            hyperlinks: Hyperlinks::with_limit(settings.hyperlink_limit),
            conditional_formats: Vec::new(),
            next_priority: 1,
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the style registry shared with the rest of the workbook
    pub fn styles(&self) -> &SharedStyles {
        &self.styles
    }

    // === Cell styles ===

    /// Get the style of a cell by address string (e.g., "A1")
    pub fn cell_style(&self, address: &str) -> Result<StyleRef> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_style_at(addr.row, addr.col))
    }

    /// Set the style of a cell by row and column indices
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: StyleRef) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        let under_range = self.range_styles.iter().any(|(b, _)| b.contains(col, row));
        if style.is_default() && !under_range {
            self.cell_styles.remove(&(row, col));
        } else {
            self.cell_styles.insert((row, col), style);
        }
        Ok(())
    }

    /// Register a style definition and set it on a cell
    pub fn set_style(&mut self, address: &str, style: Style) -> Result<StyleRef> {
        let addr = CellAddress::parse(address)?;
        let style = self.styles.borrow_mut().add_styles(style);
        self.set_cell_style_at(addr.row, addr.col, style)?;
        Ok(style)
    }

    /// Set a style on every cell of a range
    ///
    /// The range is stored as one entry whatever its size. Cell styles set
    /// inside it earlier are dropped.
    pub fn apply_style(&mut self, bounds: &Bounds, style: StyleRef) -> Result<()> {
        bounds.check_in_sheet()?;
        self.cell_styles
            .retain(|&(row, col), _| !bounds.contains(col, row));
        self.range_styles
            .retain(|(covered, _)| !bounds.contains_bounds(covered));
        self.range_styles.push((*bounds, style));
        Ok(())
    }

    // === Hyperlinks ===

    /// Add a hyperlink to a range
    ///
    /// Returns the style to apply to the range; see [`Hyperlinks::add`].
    /// Cell styles are left untouched, use [`set_hyperlink`](Self::set_hyperlink)
    /// to apply the style as well.
    pub fn add_hyperlink<L: Into<Link>>(&mut self, bounds: Bounds, link: L) -> Result<StyleRef> {
        let mut styles = self.styles.borrow_mut();
        self.hyperlinks
            .add(&mut styles, &mut self.relationships, bounds, link)
    }

    /// Add a hyperlink to a range and style its cells
    ///
    /// Bounds are checked before the hyperlink is stored, so styling the
    /// range cannot fail once the hyperlink is in place.
    pub fn set_hyperlink<L: Into<Link>>(&mut self, bounds: Bounds, link: L) -> Result<StyleRef> {
        let style = self.add_hyperlink(bounds, link)?;
        self.apply_style(&bounds, style)?;
        Ok(style)
    }

    /// Get the hyperlink of a cell by address string
    pub fn hyperlink(&self, address: &str) -> Result<Option<HyperlinkInfo>> {
        self.hyperlinks.get(&self.relationships, self, address)
    }

    /// Remove every hyperlink touching a range, returning how many were removed
    ///
    /// Cell styles are left as they are.
    pub fn remove_hyperlink(&mut self, bounds: &Bounds) -> usize {
        self.hyperlinks.remove(bounds)
    }

    pub fn hyperlinks(&self) -> &Hyperlinks {
        &self.hyperlinks
    }

    // === Relationships ===

    pub fn relationships(&self) -> &PartRelationships {
        &self.relationships
    }

    // === Loading ===

    /// Install the parts read from markup
    ///
    /// Only a sheet without hyperlinks, relationships or conditional
    /// formatting can be loaded. Everything is checked before the sheet
    /// changes, so a failed load leaves it as it was.
    pub fn load_parts(
        &mut self,
        relationships: Option<Relationships>,
        hyperlinks: Vec<Hyperlink>,
        formats: Vec<ConditionalFormatting>,
    ) -> Result<()> {
        if !self.hyperlinks.is_empty()
            || self.relationships.is_attached()
            || !self.conditional_formats.is_empty()
        {
            return Err(Error::SheetNotEmpty(self.name.clone()));
        }

        let mut links = self.hyperlinks.clone();
        for hyperlink in hyperlinks {
            links.insert_loaded(hyperlink)?;
        }
        formats.iter().try_for_each(ConditionalFormatting::validate)?;

        if let Some(table) = relationships {
            self.relationships = PartRelationships::with_table(table);
        }
        self.hyperlinks = links;

        let mut styles = self.styles.borrow_mut();
        for mut formatting in formats {
            formatting.prepare(&mut styles, &mut self.next_priority);
            self.conditional_formats.push(formatting);
        }
        Ok(())
    }

    // === Conditional Formatting ===

    /// Add a conditional formatting block
    ///
    /// The block is validated first. Rule styles are then registered in the
    /// workbook's registry and rules without a priority are numbered after
    /// the existing ones.
    pub fn add_conditional_formatting(&mut self, mut formatting: ConditionalFormatting) -> Result<()> {
        formatting.validate()?;
        formatting.prepare(&mut self.styles.borrow_mut(), &mut self.next_priority);
        self.conditional_formats.push(formatting);
        Ok(())
    }

    /// Get all conditional formatting blocks
    pub fn conditional_formats(&self) -> &[ConditionalFormatting] {
        &self.conditional_formats
    }

    /// Get the blocks covering a cell
    pub fn conditional_formats_at(&self, row: u32, col: u16) -> Vec<&ConditionalFormatting> {
        self.conditional_formats
            .iter()
            .filter(|f| f.applies_to(row, col))
            .collect()
    }

    /// Remove every block with a range touching `bounds`
    pub fn remove_conditional_formatting(&mut self, bounds: &Bounds) -> usize {
        let before = self.conditional_formats.len();
        self.conditional_formats.retain(|f| !f.overlaps(bounds));
        before - self.conditional_formats.len()
    }
}

impl CellStyles for Worksheet {
    fn cell_style_at(&self, row: u32, col: u16) -> StyleRef {
        self.cell_styles
            .get(&(row, col))
            .or_else(|| {
                self.range_styles
                    .iter()
                    .rev()
                    .find(|(bounds, _)| bounds.contains(col, row))
                    .map(|(_, style)| style)
            })
            .copied()
            .unwrap_or_default()
    }
}
