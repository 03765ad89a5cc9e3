//! Workbook files as a [`Spreadsheet`]

use crate::config::WorkbookConfig;
use crate::error::LpSheetResult;
use crate::excel::address::{CellRange, CellRef, ColumnRange};
use crate::excel::grid::{MemorySpreadsheet, Spreadsheet};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{Cell, Table};
use std::path::PathBuf;
use tracing::debug;

/// Reads from an input workbook and persists every write to the output
/// workbook. The output file is loaded on the first write (when it
/// exists) and rewritten wholesale after each `clear`/`update`, so
/// other sheets in it keep their values. Formulas are flattened to values.
pub struct XlsxSpreadsheet {
    input: MemorySpreadsheet,
    output_path: PathBuf,
    output: Option<MemorySpreadsheet>,
}

impl XlsxSpreadsheet {
    pub fn open(config: &WorkbookConfig) -> LpSheetResult<Self> {
        let input = ExcelImporter::new(&config.input).import()?;
        Ok(Self {
            input,
            output_path: config.output_path().to_path_buf(),
            output: None,
        })
    }

    fn output_mut(&mut self) -> LpSheetResult<&mut MemorySpreadsheet> {
        if self.output.is_none() {
            let loaded = if self.output_path.exists() {
                ExcelImporter::new(&self.output_path).import()?
            } else {
                MemorySpreadsheet::new()
            };
            self.output = Some(loaded);
        }
        Ok(self.output.get_or_insert_with(MemorySpreadsheet::new))
    }

    fn save(&self) -> LpSheetResult<()> {
        if let Some(output) = &self.output {
            debug!(path = %self.output_path.display(), "saving output workbook");
            ExcelExporter::new(output).export(&self.output_path)?;
        }
        Ok(())
    }
}

impl Spreadsheet for XlsxSpreadsheet {
    fn cell(&self, sheet: &str, at: CellRef) -> LpSheetResult<Cell> {
        self.input.cell(sheet, at)
    }

    fn column_range(&self, sheet: &str, range: ColumnRange) -> LpSheetResult<Vec<Cell>> {
        self.input.column_range(sheet, range)
    }

    fn clear(&mut self, sheet: &str, range: CellRange) -> LpSheetResult<()> {
        self.output_mut()?.clear(sheet, range)?;
        self.save()
    }

    fn update(&mut self, sheet: &str, anchor: CellRef, table: &Table) -> LpSheetResult<()> {
        self.output_mut()?.update(sheet, anchor, table)?;
        self.save()
    }
}
