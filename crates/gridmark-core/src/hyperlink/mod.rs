//! Hyperlinks of a worksheet
//!
//! A sheet keeps its hyperlinks as a list of [`Hyperlink`] records. No two
//! records may cover overlapping ranges; adding a link to exactly the same
//! range replaces the existing one. External targets are stored in the
//! sheet's relationship table and referenced by id.

mod info;

pub use info::{
    Hyperlink, HyperlinkInfo, HyperlinkTarget, Link, MAX_TARGET_LEN, MAX_TOOLTIP_LEN,
};

use crate::bounds::Bounds;
use crate::cell::to_indexes;
use crate::error::{Error, Result};
use crate::relationships::{PartRelationships, RelationshipType};
use crate::style::{NamedStyle, StyleRef, StyleRegistry};

/// Maximum number of hyperlinks in one worksheet
pub const EXCEL_HYPERLINK_LIMIT: usize = 65_530;

/// Lookup of the current style of a cell
pub trait CellStyles {
    /// Style of the cell at (row, col), `DefaultDirect` if it has none
    fn cell_style_at(&self, row: u32, col: u16) -> StyleRef;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefaultStyle {
    Pending,
    Resolved(StyleRef),
}

/// Hyperlink collection of one worksheet
#[derive(Debug, Clone)]
pub struct Hyperlinks {
    items: Vec<Hyperlink>,
    default_style: DefaultStyle,
    limit: usize,
}

impl Default for Hyperlinks {
    fn default() -> Self {
        Self::new()
    }
}

impl Hyperlinks {
    /// Create an empty collection with the format's limit
    pub fn new() -> Self {
        Self::with_limit(EXCEL_HYPERLINK_LIMIT)
    }

    /// Create an empty collection holding at most `limit` hyperlinks
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            default_style: DefaultStyle::Pending,
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn ensure_default_style(&mut self, styles: &mut StyleRegistry) -> StyleRef {
        match self.default_style {
            DefaultStyle::Resolved(style) => style,
            DefaultStyle::Pending => {
                let style = styles.default_for(NamedStyle::Hyperlink);
                self.default_style = DefaultStyle::Resolved(style);
                style
            }
        }
    }

    /// Add a hyperlink to a range
    ///
    /// Returns the style the caller should apply to the cells of `bounds`:
    /// the style carried by `link`, or the default hyperlink style.
    ///
    /// Adding to a range that equals the range of an existing hyperlink
    /// replaces it. Nothing changes if an error is returned, apart from the
    /// default hyperlink style being registered.
    ///
    /// # Errors
    ///
    /// - [`Error::RowOutOfBounds`] or [`Error::ColumnOutOfBounds`] if
    ///   `bounds` does not fit on a worksheet
    /// - [`Error::InvalidLinkShape`] if the link is empty or too long
    /// - [`Error::OverlapConflict`] if `bounds` partially overlaps an
    ///   existing hyperlink
    /// - [`Error::LimitExceeded`] if the collection is full and no existing
    ///   hyperlink is replaced
    pub fn add<L: Into<Link>>(
        &mut self,
        styles: &mut StyleRegistry,
        relationships: &mut PartRelationships,
        bounds: Bounds,
        link: L,
    ) -> Result<StyleRef> {
        bounds.check_in_sheet()?;
        let default_style = self.ensure_default_style(styles);
        let info = link.into().into_info()?;

        let mut existing = None;
        for (index, item) in self.items.iter().enumerate() {
            if item.bounds.equals(&bounds) {
                existing = Some(index);
            } else if item.bounds.overlaps(&bounds) {
                return Err(Error::OverlapConflict {
                    existing: item.bounds,
                    requested: bounds,
                });
            }
        }

        let record = info.to_record()?;

        if existing.is_none() && self.items.len() >= self.limit {
            return Err(Error::LimitExceeded(self.limit));
        }

        let rid = match record.external {
            Some(target) => {
                let table = relationships.attach_if_required();
                let id = table
                    .get_external_id(&RelationshipType::Hyperlink, &target)
                    .cloned();
                Some(id.unwrap_or_else(|| table.add_link(RelationshipType::Hyperlink, target)))
            }
            None => None,
        };

        let hyperlink = Hyperlink {
            bounds,
            rid,
            location: record.location,
            tooltip: record.tooltip,
            display: record.display,
        };

        match existing {
            Some(index) => {
                log::debug!("replacing hyperlink at {}", bounds);
                self.items[index] = hyperlink;
            }
            None => self.items.push(hyperlink),
        }

        Ok(record.style.or(default_style))
    }

    /// Get the hyperlink covering a cell, by A1 reference
    pub fn get<C: CellStyles + ?Sized>(
        &self,
        relationships: &PartRelationships,
        cells: &C,
        reference: &str,
    ) -> Result<Option<HyperlinkInfo>> {
        let (col, row) = to_indexes(reference)?;
        Ok(self.get_at(relationships, cells, row, col))
    }

    /// Get the hyperlink covering the cell at (row, col)
    ///
    /// The returned style is the cell's current style.
    pub fn get_at<C: CellStyles + ?Sized>(
        &self,
        relationships: &PartRelationships,
        cells: &C,
        row: u32,
        col: u16,
    ) -> Option<HyperlinkInfo> {
        let hyperlink = self
            .items
            .iter()
            .find(|item| item.bounds.contains(col, row))?;

        let external = match &hyperlink.rid {
            Some(rid) => {
                let target = relationships.get_target_by_id(rid);
                if target.is_none() {
                    log::warn!("hyperlink at {} refers to missing relationship {}", hyperlink.bounds, rid);
                }
                target
            }
            None => None,
        };

        HyperlinkInfo::from_record(hyperlink, external, cells.cell_style_at(row, col))
    }

    /// Remove every hyperlink overlapping `bounds`
    ///
    /// Returns the number of removed hyperlinks.
    pub fn remove(&mut self, bounds: &Bounds) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.bounds.overlaps(bounds));
        let removed = before - self.items.len();
        if removed > 0 {
            log::debug!("removed {} hyperlink(s) overlapping {}", removed, bounds);
        }
        removed
    }

    /// Insert a record read from markup
    ///
    /// The overlap rule still applies; the limit does not, so files written
    /// by other tools can be loaded as they are.
    pub fn insert_loaded(&mut self, hyperlink: Hyperlink) -> Result<()> {
        hyperlink.bounds.check_in_sheet()?;
        if let Some(item) = self
            .items
            .iter()
            .find(|item| item.bounds.overlaps(&hyperlink.bounds))
        {
            return Err(Error::OverlapConflict {
                existing: item.bounds,
                requested: hyperlink.bounds,
            });
        }
        self.items.push(hyperlink);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the records in collection order
    pub fn iter(&self) -> impl Iterator<Item = &Hyperlink> {
        self.items.iter()
    }
}
