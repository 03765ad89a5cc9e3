//! A1-style cell addressing

use crate::error::{LpSheetError, LpSheetResult};
use std::fmt;
use std::str::FromStr;

/// Convert a 0-based column index to its letter
///
/// Examples:
/// - 0 → A
/// - 25 → Z
/// - 26 → AA
pub fn column_index_to_letter(index: u16) -> String {
    let mut result = String::new();
    let mut idx = index as usize;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert column letters (case-insensitive) to a 0-based index
pub fn column_letter_to_index(letters: &str) -> Option<u16> {
    if letters.is_empty() {
        return None;
    }
    let mut index: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as u32 + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
        if index > u16::MAX as u32 {
            return None;
        }
    }
    Some((index - 1) as u16)
}

/// A single cell, 0-based internally, `C4` on the outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// 1-based row number as shown in the sheet
    pub fn sheet_row(&self) -> u32 {
        self.row + 1
    }

    pub fn parse(text: &str) -> LpSheetResult<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| invalid(text, "missing row number"))?;
        let (letters, digits) = text.split_at(split);

        let col = column_letter_to_index(letters).ok_or_else(|| invalid(text, "bad column"))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| invalid(text, "bad row number"))?;
        if row == 0 {
            return Err(invalid(text, "rows start at 1"));
        }

        Ok(Self::new(row - 1, col))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_index_to_letter(self.col), self.row + 1)
    }
}

/// Inclusive rectangle such as `A1:C1000`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn parse(text: &str) -> LpSheetResult<Self> {
        let (a, b) = text
            .split_once(':')
            .ok_or_else(|| invalid(text, "expected START:END"))?;
        let (a, b) = (CellRef::parse(a)?, CellRef::parse(b)?);
        Ok(Self {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        })
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        (self.start.row..=self.end.row).contains(&cell.row)
            && (self.start.col..=self.end.col).contains(&cell.col)
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A vertical span within one column, such as `B24:B38`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRange {
    pub col: u16,
    pub first_row: u32,
    pub last_row: u32,
}

impl ColumnRange {
    pub fn parse(text: &str) -> LpSheetResult<Self> {
        let range = CellRange::parse(text)?;
        if range.start.col != range.end.col {
            return Err(invalid(text, "range must stay within one column"));
        }
        Ok(Self {
            col: range.start.col,
            first_row: range.start.row,
            last_row: range.end.row,
        })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.last_row - self.first_row) as usize + 1
    }

    pub fn cells(&self) -> impl Iterator<Item = CellRef> + '_ {
        (self.first_row..=self.last_row).map(move |row| CellRef::new(row, self.col))
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = column_index_to_letter(self.col);
        write!(
            f,
            "{}{}:{}{}",
            letter,
            self.first_row + 1,
            letter,
            self.last_row + 1
        )
    }
}

fn invalid(text: &str, reason: &str) -> LpSheetError {
    LpSheetError::Config(format!("invalid cell address '{}': {}", text, reason))
}

// Config files carry addresses as A1 text.
macro_rules! impl_from_str {
    ($ty:ty) => {
        impl FromStr for $ty {
            type Err = LpSheetError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::parse(s)
            }
        }
    };
}

impl_from_str!(CellRef);
impl_from_str!(CellRange);
impl_from_str!(ColumnRange);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_index_to_letter() {
        assert_eq!(column_index_to_letter(0), "A");
        assert_eq!(column_index_to_letter(1), "B");
        assert_eq!(column_index_to_letter(25), "Z");
        assert_eq!(column_index_to_letter(26), "AA");
        assert_eq!(column_index_to_letter(27), "AB");
        assert_eq!(column_index_to_letter(701), "ZZ");
    }

    #[test]
    fn test_column_letter_to_index() {
        assert_eq!(column_letter_to_index("A"), Some(0));
        assert_eq!(column_letter_to_index("f"), Some(5));
        assert_eq!(column_letter_to_index("AA"), Some(26));
        assert_eq!(column_letter_to_index("ZZ"), Some(701));
        assert_eq!(column_letter_to_index(""), None);
        assert_eq!(column_letter_to_index("A1"), None);
    }

    #[test]
    fn test_cell_ref_parse() {
        let c4 = CellRef::parse("C4").unwrap();
        assert_eq!(c4, CellRef::new(3, 2));
        assert_eq!(c4.sheet_row(), 4);
        assert_eq!(c4.to_string(), "C4");
        assert!(CellRef::parse("C0").is_err());
        assert!(CellRef::parse("4").is_err());
        assert!(CellRef::parse("C").is_err());
    }

    #[test]
    fn test_cell_range_normalizes_corners() {
        let r = CellRange::parse("C10:A1").unwrap();
        assert_eq!(r.to_string(), "A1:C10");
        assert!(r.contains(CellRef::new(0, 0)));
        assert!(r.contains(CellRef::new(9, 2)));
        assert!(!r.contains(CellRef::new(10, 2)));
        assert!(!r.contains(CellRef::new(0, 3)));
    }

    #[test]
    fn test_column_range() {
        let r = ColumnRange::parse("B24:B38").unwrap();
        assert_eq!(r.col, 1);
        assert_eq!(r.len(), 15);
        assert_eq!(r.cells().next(), Some(CellRef::new(23, 1)));
        assert_eq!(r.to_string(), "B24:B38");
        assert!(ColumnRange::parse("B1:C5").is_err());
    }
}
