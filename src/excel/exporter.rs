//! Excel exporter - in-memory sheets → .xlsx

use crate::error::{LpSheetError, LpSheetResult};
use crate::excel::grid::{MemorySpreadsheet, SheetGrid};
use crate::types::Cell;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Writes every sheet of a [`MemorySpreadsheet`] as plain values
pub struct ExcelExporter<'a> {
    sheets: &'a MemorySpreadsheet,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(sheets: &'a MemorySpreadsheet) -> Self {
        Self { sheets }
    }

    /// Save to `output_path`, replacing any existing file
    pub fn export(&self, output_path: &Path) -> LpSheetResult<()> {
        let mut workbook = Workbook::new();

        for (name, grid) in self.sheets.sheets() {
            let worksheet = workbook.add_worksheet();
            worksheet
                .set_name(name)
                .map_err(|e| LpSheetError::Workbook(format!("Failed to set worksheet name: {}", e)))?;
            Self::export_grid(worksheet, grid)?;
        }

        // An .xlsx file needs at least one worksheet
        if self.sheets.sheets().is_empty() {
            workbook.add_worksheet();
        }

        workbook.save(output_path).map_err(|e| {
            LpSheetError::Workbook(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    fn export_grid(worksheet: &mut Worksheet, grid: &SheetGrid) -> LpSheetResult<()> {
        for (at, cell) in grid.cells() {
            let written = match cell {
                Cell::Empty => continue,
                Cell::Int(i) => worksheet.write_number(at.row, at.col, *i as f64),
                Cell::Number(n) => worksheet.write_number(at.row, at.col, *n),
                Cell::Text(s) => worksheet.write_string(at.row, at.col, s),
            };
            written.map_err(|e| {
                LpSheetError::Workbook(format!("Failed to write cell {}: {}", at, e))
            })?;
        }
        Ok(())
    }
}
