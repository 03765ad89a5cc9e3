//! lpsheet - binary linear programs kept in a spreadsheet
//!
//! The model lives in a workbook: an objective expression in one cell and
//! constraints in three parallel columns (expression, operator, right-hand
//! side). Every decision variable is binary. The solved assignment, the
//! objective value and each constraint's slack are written back to an
//! output sheet.
//!
//! # Example
//!
//! ```
//! use lpsheet::config::LayoutConfig;
//! use lpsheet::core::{run, MicrolpOracle, RunOutcome};
//! use lpsheet::excel::MemorySpreadsheet;
//!
//! let layout = LayoutConfig::default();
//! let mut sheets = MemorySpreadsheet::new();
//! sheets.set("Formulasi", "C4", "+5X1+4X2+3X3")?;
//! sheets.set("Formulasi", "B24", "2X1+3X2+X3")?;
//! sheets.set("Formulasi", "E6", "<=")?;
//! sheets.set("Formulasi", "F6", 5.0)?;
//! sheets.sheet_mut("Output");
//!
//! let outcome = run(&layout, &mut sheets, &MicrolpOracle::new())?;
//! assert!(matches!(outcome, RunOutcome::Solved(_)));
//! # Ok::<(), lpsheet::error::LpSheetError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod logging;
pub mod parser;
pub mod types;

// Re-export commonly used types
pub use error::{LpSheetError, LpSheetResult};
pub use types::{Cell, Constraint, Model, Operator, Table, Term};
