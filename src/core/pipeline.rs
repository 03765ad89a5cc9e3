use crate::config::{AppConfig, LayoutConfig};
use crate::core::builder::{build_model, ConstraintRow};
use crate::core::oracle::{Oracle, OracleOutcome};
use crate::core::report::{no_solution_table, SolveReport, NO_OPTIMAL_MARKER};
use crate::error::{LpSheetError, LpSheetResult};
use crate::excel::{Spreadsheet, XlsxSpreadsheet};
use crate::types::{Model, Table};
use std::time::Instant;
use tracing::{info, warn};

/// Non-error result of a run
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Solved(SolveReport),
    /// Infeasible or unbounded; the marker was written to the output sheet
    NoOptimalSolution,
}

impl RunOutcome {
    pub fn message(&self) -> String {
        match self {
            RunOutcome::Solved(report) => {
                format!("✅ Solver finished! Objective value = {}", report.objective)
            }
            RunOutcome::NoOptimalSolution => format!("❌ {}", NO_OPTIMAL_MARKER),
        }
    }

    /// Exactly what a run writes at the output anchor
    pub fn table(&self) -> Table {
        match self {
            RunOutcome::Solved(report) => report.table(),
            RunOutcome::NoOptimalSolution => no_solution_table(),
        }
    }
}

/// Text reported to the caller when a run fails
pub fn error_message(error: &LpSheetError) -> String {
    format!("❌ Error: {}", error)
}

/// Read the objective and constraint rows from the input sheet
pub fn read_model<S: Spreadsheet + ?Sized>(layout: &LayoutConfig, sheet: &S) -> LpSheetResult<Model> {
    let name = &layout.input_sheet;
    let objective = sheet.cell(name, layout.objective)?.as_text();
    let lhs = sheet.column_range(name, layout.constraints)?;
    let operators = sheet.column_range(name, layout.operators)?;
    let rhs = sheet.column_range(name, layout.rhs)?;

    let rows = ConstraintRow::zip_columns(
        [layout.constraints, layout.operators, layout.rhs],
        [&lhs, &operators, &rhs],
    );
    build_model(&objective, &rows)
}

/// Parse, solve and write the result table.
///
/// Parse and model errors surface before anything is written. The output
/// range is cleared right before the result is written.
pub fn run<S: Spreadsheet + ?Sized>(
    layout: &LayoutConfig,
    sheet: &mut S,
    oracle: &dyn Oracle,
) -> LpSheetResult<RunOutcome> {
    let started = Instant::now();
    let model = read_model(layout, &*sheet)?;
    info!(
        variables = model.variable_count(),
        constraints = model.constraints.len(),
        "model loaded"
    );

    let outcome = oracle.solve(&model)?;
    sheet.clear(&layout.output_sheet, layout.output_clear)?;

    let result = match outcome {
        OracleOutcome::Optimal { values, objective } => {
            let report = SolveReport::new(&model, values, objective);
            sheet.update(&layout.output_sheet, layout.output_anchor, &report.table())?;
            info!(
                objective = report.objective,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "optimal solution written"
            );
            RunOutcome::Solved(report)
        }
        OracleOutcome::NotOptimal => {
            let no_solution = RunOutcome::NoOptimalSolution;
            sheet.update(&layout.output_sheet, layout.output_anchor, &no_solution.table())?;
            warn!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "no optimal solution"
            );
            no_solution
        }
    };

    Ok(result)
}

/// Open the configured workbook and run once against it
pub fn run_workbook(config: &AppConfig, oracle: &dyn Oracle) -> LpSheetResult<RunOutcome> {
    let mut workbook = XlsxSpreadsheet::open(&config.workbook)?;
    run(&config.layout, &mut workbook, oracle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oracle::MicrolpOracle;
    use crate::excel::{CellRef, MemorySpreadsheet};
    use crate::types::Cell;

    fn sheet_with(objective: &str, rows: &[(&str, &str, f64)]) -> MemorySpreadsheet {
        let mut sheet = MemorySpreadsheet::new();
        sheet.set("Formulasi", "C4", objective).unwrap();
        for (i, (lhs, op, rhs)) in rows.iter().enumerate() {
            sheet.set("Formulasi", &format!("B{}", 24 + i), *lhs).unwrap();
            sheet.set("Formulasi", &format!("E{}", 6 + i), *op).unwrap();
            sheet.set("Formulasi", &format!("F{}", 6 + i), *rhs).unwrap();
        }
        sheet
    }

    #[test]
    fn test_read_model_default_layout() {
        let sheet = sheet_with("3X1+2X2", &[("X1+X2", "<=", 1.0)]);
        let model = read_model(&LayoutConfig::default(), &sheet).unwrap();
        assert_eq!(model.objective, vec![3.0, 2.0]);
        assert_eq!(model.constraints.len(), 1);
        assert_eq!(model.constraints[0].row, 24);
        assert_eq!(model.constraints[0].rhs, 1.0);
    }

    #[test]
    fn test_run_writes_table() {
        let mut sheet = sheet_with("X1", &[("X1", "<=", 1.0)]);
        let outcome = run(&LayoutConfig::default(), &mut sheet, &MicrolpOracle::new()).unwrap();

        let RunOutcome::Solved(report) = &outcome else {
            panic!("expected a solution, got {outcome:?}");
        };
        assert_eq!(report.values, vec![1]);
        assert_eq!(report.objective, 1.0);
        assert_eq!(report.slacks, vec![0.0]);

        let output = sheet.sheet("Output").unwrap();
        assert_eq!(output.get(CellRef::new(1, 0)), Cell::Int(1));
        assert_eq!(output.get(CellRef::new(1, 1)), Cell::Number(1.0));
        assert_eq!(outcome.message(), "✅ Solver finished! Objective value = 1");
    }

    #[test]
    fn test_outcome_table_matches_written_cells() {
        let mut sheet = sheet_with("X1+X2", &[("X1+X2", "<=", 1.0)]);
        sheet.set("Output", "D1", "untouched").unwrap();
        let outcome = run(&LayoutConfig::default(), &mut sheet, &MicrolpOracle::new()).unwrap();

        let table = outcome.table();
        assert_eq!(table.len(), 3);
        let output = sheet.sheet("Output").unwrap();
        for (r, row) in table.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                assert_eq!(&output.get(CellRef::new(r as u32, c as u16)), cell);
            }
        }
        assert_eq!(
            RunOutcome::NoOptimalSolution.table(),
            vec![vec![Cell::from(NO_OPTIMAL_MARKER)]]
        );
    }

    #[test]
    fn test_run_infeasible_writes_marker() {
        let mut sheet = sheet_with("X1", &[("X1", ">=", 1.0), ("X1", "<=", 0.0)]);
        let outcome = run(&LayoutConfig::default(), &mut sheet, &MicrolpOracle::new()).unwrap();
        assert_eq!(outcome, RunOutcome::NoOptimalSolution);
        assert_eq!(
            sheet.sheet("Output").unwrap().get(CellRef::new(0, 0)),
            Cell::from(NO_OPTIMAL_MARKER)
        );
    }

    #[test]
    fn test_parse_failure_leaves_output_untouched() {
        let mut sheet = sheet_with(".X1", &[]);
        sheet.set("Output", "A1", "stale").unwrap();
        let err = run(&LayoutConfig::default(), &mut sheet, &MicrolpOracle::new()).unwrap_err();
        assert_eq!(err.kind(), "parse");
        assert!(error_message(&err).starts_with("❌ Error: Parse error in objective"));
        assert_eq!(
            sheet.sheet("Output").unwrap().get(CellRef::new(0, 0)),
            Cell::from("stale")
        );
    }
}
