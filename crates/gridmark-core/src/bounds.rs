//! Rectangular cell regions

use crate::cell::CellAddress;
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A non-empty rectangle of cells on one sheet (e.g. "A1:C3")
///
/// Bounds are always normalized: the first row/column is never greater
/// than the last one. All edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    first_row: u32,
    first_col: u16,
    last_row: u32,
    last_col: u16,
}

impl Bounds {
    /// Create bounds from zero-based indices, swapping edges if needed
    pub fn new(first_row: u32, first_col: u16, last_row: u32, last_col: u16) -> Self {
        Self {
            first_row: first_row.min(last_row),
            first_col: first_col.min(last_col),
            last_row: first_row.max(last_row),
            last_col: first_col.max(last_col),
        }
    }

    /// Bounds covering a single cell
    pub fn from_cell(row: u32, col: u16) -> Self {
        Self::new(row, col, row, col)
    }

    /// Bounds spanning two corner addresses
    pub fn from_addresses(a: CellAddress, b: CellAddress) -> Self {
        Self::new(a.row, a.col, b.row, b.col)
    }

    /// Parse "A1:B10" or a single "A1" reference
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidBounds("empty reference".into()));
        }

        match s.split_once(':') {
            Some((first, last)) => {
                if last.contains(':') {
                    return Err(Error::InvalidBounds(s.to_string()));
                }
                Ok(Self::from_addresses(
                    CellAddress::parse(first)?,
                    CellAddress::parse(last)?,
                ))
            }
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::from_cell(addr.row, addr.col))
            }
        }
    }

    pub fn first_row(&self) -> u32 {
        self.first_row
    }

    pub fn first_col(&self) -> u16 {
        self.first_col
    }

    pub fn last_row(&self) -> u32 {
        self.last_row
    }

    pub fn last_col(&self) -> u16 {
        self.last_col
    }

    /// Top-left corner
    pub fn start(&self) -> CellAddress {
        CellAddress::new(self.first_row, self.first_col)
    }

    /// Bottom-right corner
    pub fn end(&self) -> CellAddress {
        CellAddress::new(self.last_row, self.last_col)
    }

    /// Same rectangle as `other`
    pub fn equals(&self, other: &Bounds) -> bool {
        self == other
    }

    /// Check if two rectangles share at least one cell
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.first_row <= other.last_row
            && other.first_row <= self.last_row
            && self.first_col <= other.last_col
            && other.first_col <= self.last_col
    }

    /// Check if a cell is within these bounds
    pub fn contains(&self, col: u16, row: u32) -> bool {
        (self.first_col..=self.last_col).contains(&col)
            && (self.first_row..=self.last_row).contains(&row)
    }

    /// Check if an address is within these bounds
    pub fn contains_address(&self, addr: &CellAddress) -> bool {
        self.contains(addr.col, addr.row)
    }

    /// Check that the rectangle lies on a worksheet
    pub fn check_in_sheet(&self) -> Result<()> {
        if self.last_row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(self.last_row, MAX_ROWS - 1));
        }
        if self.last_col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(u32::from(self.last_col), MAX_COLS - 1));
        }
        Ok(())
    }

    /// Check if `other` lies entirely within these bounds
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains(other.first_col, other.first_row)
            && self.contains(other.last_col, other.last_row)
    }

    /// Number of rows covered
    pub fn row_count(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    /// Number of columns covered
    pub fn col_count(&self) -> u16 {
        self.last_col - self.first_col + 1
    }

    /// Iterate over all cell addresses (row by row)
    pub fn cells(&self) -> impl Iterator<Item = CellAddress> {
        let (first_col, last_col) = (self.first_col, self.last_col);
        (self.first_row..=self.last_row)
            .flat_map(move |row| (first_col..=last_col).map(move |col| CellAddress::new(row, col)))
    }

    /// Format as "A1:B10", or "A1" for a single cell
    pub fn to_a1_string(&self) -> String {
        if self.first_row == self.last_row && self.first_col == self.last_col {
            self.start().to_a1_string()
        } else {
            format!("{}:{}", self.start(), self.end())
        }
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for Bounds {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<CellAddress> for Bounds {
    fn from(addr: CellAddress) -> Self {
        Self::from_cell(addr.row, addr.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalized() {
        let b = Bounds::new(5, 4, 1, 2);
        assert_eq!(b.first_row(), 1);
        assert_eq!(b.first_col(), 2);
        assert_eq!(b.last_row(), 5);
        assert_eq!(b.last_col(), 4);
        assert_eq!(b, Bounds::parse("E6:C2").unwrap());
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(Bounds::parse("A1:B2").unwrap(), Bounds::new(0, 0, 1, 1));
        assert_eq!(Bounds::parse("C3").unwrap(), Bounds::from_cell(2, 2));
        assert_eq!(Bounds::new(0, 0, 9, 1).to_string(), "A1:B10");
        assert_eq!(Bounds::from_cell(0, 0).to_string(), "A1");
        assert!(Bounds::parse("").is_err());
        assert!(Bounds::parse("A1:B2:C3").is_err());
        assert!(Bounds::parse("A1:").is_err());
    }

    #[test]
    fn test_overlaps() {
        let a = Bounds::new(0, 0, 1, 1);
        assert!(a.overlaps(&Bounds::new(1, 1, 2, 2))); // shared corner
        assert!(a.overlaps(&Bounds::new(1, 0, 1, 5))); // shared edge
        assert!(!a.overlaps(&Bounds::new(2, 0, 3, 1)));
        assert!(!a.overlaps(&Bounds::new(0, 2, 1, 3)));
    }

    #[test]
    fn test_contains() {
        let b = Bounds::parse("B2:D4").unwrap();
        assert!(b.contains(1, 1));
        assert!(b.contains(3, 3));
        assert!(b.contains(2, 2));
        assert!(!b.contains(0, 0));
        assert!(!b.contains(1, 4));
        assert!(b.contains_address(&CellAddress::parse("C3").unwrap()));
    }

    #[test]
    fn test_check_in_sheet() {
        assert!(Bounds::parse("A1:XFD1048576").unwrap().check_in_sheet().is_ok());
        assert_eq!(
            Bounds::new(1_048_575, 0, 1_048_576, 0).check_in_sheet(),
            Err(Error::RowOutOfBounds(1_048_576, 1_048_575))
        );
        assert_eq!(
            Bounds::from_cell(0, 16_384).check_in_sheet(),
            Err(Error::ColumnOutOfBounds(16_384, 16_383))
        );
    }

    #[test]
    fn test_contains_bounds() {
        let outer = Bounds::parse("B2:D4").unwrap();
        assert!(outer.contains_bounds(&Bounds::parse("C3:D4").unwrap()));
        assert!(outer.contains_bounds(&outer));
        assert!(!outer.contains_bounds(&Bounds::parse("C3:E4").unwrap()));
    }

    #[test]
    fn test_cells() {
        let cells: Vec<_> = Bounds::parse("A1:B2").unwrap().cells().collect();
        assert_eq!(
            cells,
            vec![
                CellAddress::new(0, 0),
                CellAddress::new(0, 1),
                CellAddress::new(1, 0),
                CellAddress::new(1, 1),
            ]
        );
    }

    fn any_bounds() -> impl Strategy<Value = Bounds> {
        (0u32..50, 0u16..50, 0u32..50, 0u16..50).prop_map(|(r1, c1, r2, c2)| Bounds::new(r1, c1, r2, c2))
    }

    proptest! {
        #[test]
        fn overlaps_is_symmetric(a in any_bounds(), b in any_bounds()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        #[test]
        fn overlaps_itself(a in any_bounds()) {
            prop_assert!(a.overlaps(&a));
        }

        #[test]
        fn equal_bounds_overlap(a in any_bounds(), b in any_bounds()) {
            if a.equals(&b) {
                prop_assert!(a.overlaps(&b));
            }
        }

        #[test]
        fn overlap_means_shared_cell(a in any_bounds(), b in any_bounds()) {
            let shared = a.cells().any(|cell| b.contains_address(&cell));
            prop_assert_eq!(a.overlaps(&b), shared);
        }
    }
}
