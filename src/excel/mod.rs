//! Spreadsheet access
//!
//! - A1 addressing for cells, rectangles and column spans
//! - In-memory sheets behind the [`Spreadsheet`] trait
//! - Import: Excel (.xlsx) → sheets, via calamine
//! - Export: sheets → Excel (.xlsx), via rust_xlsxwriter

pub mod address;
mod exporter;
mod grid;
mod importer;
mod workbook;

pub use address::{CellRange, CellRef, ColumnRange};
pub use exporter::ExcelExporter;
pub use grid::{MemorySpreadsheet, SheetGrid, Spreadsheet};
pub use importer::ExcelImporter;
pub use workbook::XlsxSpreadsheet;
