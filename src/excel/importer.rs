//! Excel importer - .xlsx → in-memory sheets

use crate::error::{LpSheetError, LpSheetResult};
use crate::excel::address::CellRef;
use crate::excel::grid::{MemorySpreadsheet, SheetGrid};
use crate::types::Cell;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads every worksheet of an .xlsx file as cell values
pub struct ExcelImporter {
    path: PathBuf,
}

impl ExcelImporter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn import(&self) -> LpSheetResult<MemorySpreadsheet> {
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            LpSheetError::Workbook(format!(
                "Failed to open Excel file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut sheets = Vec::new();
        for sheet_name in workbook.sheet_names() {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                LpSheetError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            let grid = Self::convert_range(&range);
            debug!(sheet = %sheet_name, cells = grid.cells().count(), "imported worksheet");
            sheets.push((sheet_name, grid));
        }

        Ok(MemorySpreadsheet::from_sheets(sheets))
    }

    fn convert_range(range: &Range<Data>) -> SheetGrid {
        let mut grid = SheetGrid::new();
        // used_cells() positions are relative to the range's top-left corner
        let (row0, col0) = range.start().unwrap_or((0, 0));
        for (row, col, data) in range.used_cells() {
            let at = CellRef::new(row0 + row as u32, (col0 as usize + col) as u16);
            grid.set(at, Self::convert_cell(data));
        }
        grid
    }

    fn convert_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Int(*i),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::Text(s.clone()),
            Data::Bool(b) => Cell::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_cell_variants() {
        assert_eq!(ExcelImporter::convert_cell(&Data::Empty), Cell::Empty);
        assert_eq!(ExcelImporter::convert_cell(&Data::Int(3)), Cell::Int(3));
        assert_eq!(ExcelImporter::convert_cell(&Data::Float(5.5)), Cell::Number(5.5));
        assert_eq!(
            ExcelImporter::convert_cell(&Data::String("X1+X2".to_string())),
            Cell::Text("X1+X2".to_string())
        );
        assert_eq!(
            ExcelImporter::convert_cell(&Data::Bool(true)),
            Cell::Text("TRUE".to_string())
        );
    }

    #[test]
    fn test_import_missing_file_is_workbook_error() {
        let err = ExcelImporter::new("does-not-exist.xlsx").import().unwrap_err();
        assert_eq!(err.kind(), "workbook");
    }
}
