//! In-memory worksheets and the spreadsheet access trait

use crate::error::{LpSheetError, LpSheetResult};
use crate::excel::address::{CellRange, CellRef, ColumnRange};
use crate::types::{Cell, Table};
use std::collections::BTreeMap;

/// Read/write access to a spreadsheet document
pub trait Spreadsheet {
    /// Value of one cell. Missing cells read as [`Cell::Empty`].
    fn cell(&self, sheet: &str, at: CellRef) -> LpSheetResult<Cell>;

    /// One entry per row of `range`, empty cells included
    fn column_range(&self, sheet: &str, range: ColumnRange) -> LpSheetResult<Vec<Cell>>;

    /// Blank every cell inside `range`
    fn clear(&mut self, sheet: &str, range: CellRange) -> LpSheetResult<()>;

    /// Write `table` with its top-left corner at `anchor`.
    /// Empty cells in the table blank the cell underneath.
    fn update(&mut self, sheet: &str, anchor: CellRef, table: &Table) -> LpSheetResult<()>;
}

/// Sparse grid of non-empty cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    cells: BTreeMap<CellRef, Cell>,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, at: CellRef) -> Cell {
        self.cells.get(&at).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, at: CellRef, value: impl Into<Cell>) {
        let value = value.into();
        if value == Cell::Empty {
            self.cells.remove(&at);
        } else {
            self.cells.insert(at, value);
        }
    }

    pub fn clear_range(&mut self, range: CellRange) {
        self.cells.retain(|at, _| !range.contains(*at));
    }

    pub fn write_table(&mut self, anchor: CellRef, table: &Table) {
        for (r, row) in table.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let at = CellRef::new(anchor.row + r as u32, anchor.col + c as u16);
                self.set(at, value.clone());
            }
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.cells.iter().map(|(at, cell)| (*at, cell))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Dense copy of the block from A1 to the last used cell
    pub fn to_table(&self) -> Table {
        let rows = self.cells.keys().map(|c| c.row + 1).max().unwrap_or(0) as usize;
        let cols = self.cells.keys().map(|c| c.col + 1).max().unwrap_or(0) as usize;
        let mut table = vec![vec![Cell::Empty; cols]; rows];
        for (at, cell) in &self.cells {
            table[at.row as usize][at.col as usize] = cell.clone();
        }
        table
    }
}

/// Spreadsheet held entirely in memory. Sheets keep insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySpreadsheet {
    sheets: Vec<(String, SheetGrid)>,
}

impl MemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sheets(sheets: Vec<(String, SheetGrid)>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetGrid> {
        self.sheets.iter().find(|(n, _)| n == name).map(|(_, g)| g)
    }

    /// Existing sheet, or a new empty one appended at the end
    pub fn sheet_mut(&mut self, name: &str) -> &mut SheetGrid {
        let pos = match self.sheets.iter().position(|(n, _)| n == name) {
            Some(pos) => pos,
            None => {
                self.sheets.push((name.to_string(), SheetGrid::new()));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[pos].1
    }

    pub fn sheets(&self) -> &[(String, SheetGrid)] {
        &self.sheets
    }

    /// Set a single cell, creating the sheet if needed
    pub fn set(&mut self, sheet: &str, at: &str, value: impl Into<Cell>) -> LpSheetResult<()> {
        let at = CellRef::parse(at)?;
        self.sheet_mut(sheet).set(at, value);
        Ok(())
    }

    fn existing(&self, sheet: &str) -> LpSheetResult<&SheetGrid> {
        self.sheet(sheet)
            .ok_or_else(|| LpSheetError::Workbook(format!("worksheet '{}' not found", sheet)))
    }
}

impl Spreadsheet for MemorySpreadsheet {
    fn cell(&self, sheet: &str, at: CellRef) -> LpSheetResult<Cell> {
        Ok(self.existing(sheet)?.get(at))
    }

    fn column_range(&self, sheet: &str, range: ColumnRange) -> LpSheetResult<Vec<Cell>> {
        let grid = self.existing(sheet)?;
        Ok(range.cells().map(|at| grid.get(at)).collect())
    }

    fn clear(&mut self, sheet: &str, range: CellRange) -> LpSheetResult<()> {
        self.sheet_mut(sheet).clear_range(range);
        Ok(())
    }

    fn update(&mut self, sheet: &str, anchor: CellRef, table: &Table) -> LpSheetResult<()> {
        self.sheet_mut(sheet).write_table(anchor, table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_set_and_get() {
        let mut grid = SheetGrid::new();
        grid.set(CellRef::new(3, 2), "X1+X2");
        assert_eq!(grid.get(CellRef::new(3, 2)), Cell::Text("X1+X2".to_string()));
        assert_eq!(grid.get(CellRef::new(0, 0)), Cell::Empty);

        grid.set(CellRef::new(3, 2), Cell::Empty);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_clear_range_keeps_outside_cells() {
        let mut grid = SheetGrid::new();
        grid.set(CellRef::new(0, 0), 1.0);
        grid.set(CellRef::new(0, 3), 2.0);
        grid.clear_range(CellRange::parse("A1:C1000").unwrap());
        assert_eq!(grid.get(CellRef::new(0, 0)), Cell::Empty);
        assert_eq!(grid.get(CellRef::new(0, 3)), Cell::Number(2.0));
    }

    #[test]
    fn test_write_table_and_to_table() {
        let mut grid = SheetGrid::new();
        let table = vec![
            vec![Cell::from("a"), Cell::Empty],
            vec![Cell::Int(1), Cell::Number(2.5)],
        ];
        grid.write_table(CellRef::new(0, 0), &table);
        assert_eq!(grid.to_table(), table);

        grid.write_table(CellRef::new(0, 0), &vec![vec![Cell::Empty]]);
        assert_eq!(grid.get(CellRef::new(0, 0)), Cell::Empty);
    }

    #[test]
    fn test_memory_spreadsheet_missing_sheet() {
        let sheet = MemorySpreadsheet::new();
        let err = sheet.cell("Formulasi", CellRef::new(0, 0)).unwrap_err();
        assert!(err.to_string().contains("Formulasi"));
    }

    #[test]
    fn test_memory_spreadsheet_column_range_includes_blanks() {
        let mut sheet = MemorySpreadsheet::new();
        sheet.set("In", "B2", "X1").unwrap();
        sheet.set("In", "B4", "X2").unwrap();
        let values = sheet
            .column_range("In", ColumnRange::parse("B2:B4").unwrap())
            .unwrap();
        assert_eq!(
            values,
            vec![Cell::from("X1"), Cell::Empty, Cell::from("X2")]
        );
    }
}
