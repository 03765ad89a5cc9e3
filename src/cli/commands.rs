use crate::config::{AppConfig, LayoutConfig};
use crate::core::{run, run_workbook, MicrolpOracle, RunOutcome};
use crate::error::{ExprLocation, LpSheetError, LpSheetResult};
use crate::excel::{ExcelExporter, ExcelImporter, MemorySpreadsheet};
use crate::parser::parse_expression;
use crate::types::{Cell, Table};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => format_number(*n),
        other => other.as_text(),
    }
}

/// Build the effective config: file (or defaults), then command-line overrides
pub fn resolve_config(
    config: Option<PathBuf>,
    workbook: Option<PathBuf>,
    output: Option<PathBuf>,
) -> LpSheetResult<AppConfig> {
    let mut resolved = AppConfig::load_or_default(config.as_deref())?;
    if let Some(input) = workbook {
        resolved.workbook.input = input;
    }
    if output.is_some() {
        resolved.workbook.output = output;
    }
    Ok(resolved)
}

/// Execute the solve command
///
/// With `dry_run` the workbook is only read; the result table is printed
/// instead of saved.
pub fn solve(config: &AppConfig, dry_run: bool, verbose: bool) -> LpSheetResult<RunOutcome> {
    println!("{}", "🔥 lpsheet - Solving binary model".bold().green());
    println!("   Workbook: {}", config.workbook.input.display());
    if !dry_run {
        println!("   Output:   {}", config.workbook.output_path().display());
    }
    println!();

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
    }

    let oracle = MicrolpOracle::new();
    let outcome = if dry_run {
        let mut sheets = ExcelImporter::new(&config.workbook.input).import()?;
        let outcome = run(&config.layout, &mut sheets, &oracle)?;
        print_table(&outcome.table());
        outcome
    } else {
        run_workbook(config, &oracle)?
    };

    if verbose {
        if let RunOutcome::Solved(report) = &outcome {
            println!("{}", "🧮 Variables:".cyan());
            for (i, v) in report.values.iter().enumerate() {
                println!("      X{} = {}", i + 1, v);
            }
            println!("{}", "📐 Slack/Surplus:".cyan());
            for (i, s) in report.slacks.iter().enumerate() {
                println!("      #{} = {}", i + 1, format_number(*s));
            }
            println!();
        }
    }

    match &outcome {
        RunOutcome::Solved(_) => println!("{}", outcome.message().bold().green()),
        RunOutcome::NoOptimalSolution => println!("{}", outcome.message().bold().yellow()),
    }

    Ok(outcome)
}

fn print_table(table: &Table) {
    let width = table
        .iter()
        .flatten()
        .map(|c| format_cell(c).chars().count())
        .max()
        .unwrap_or(0);
    for row in table {
        let line: Vec<String> = row
            .iter()
            .map(|c| format!("{:<width$}", format_cell(c), width = width))
            .collect();
        println!("   {}", line.join(" | ").trim_end());
    }
    println!();
}

/// Execute the parse command
pub fn parse(expression: &str) -> LpSheetResult<()> {
    let coefficients = parse_expression(expression)
        .map_err(|e| LpSheetError::parse(ExprLocation::Objective, e))?;

    println!("{}", "✅ Parsed expression".bold().green());
    println!("   Canonical: {}", coefficients.to_string().bright_blue());
    for (index, coefficient) in coefficients.iter() {
        println!("      X{} = {}", index, format_number(coefficient).bold());
    }
    Ok(())
}

/// Execute the init-config command: write a config file and, optionally,
/// a blank model workbook laid out to match it
pub fn init_config(path: &Path, workbook: Option<PathBuf>) -> LpSheetResult<()> {
    let mut config = AppConfig::default();
    if let Some(ref wb) = workbook {
        config.workbook.input = wb.clone();
    }

    // refuse before anything is written
    for existing in std::iter::once(path).chain(workbook.as_deref()) {
        if existing.exists() {
            return Err(LpSheetError::Config(format!(
                "{} already exists",
                existing.display()
            )));
        }
    }

    if let Some(wb) = &workbook {
        let template = template_workbook(&config.layout);
        ExcelExporter::new(&template).export(wb)?;
        println!("{} {}", "✅ Wrote".bold().green(), wb.display());
    }

    fs::write(path, config.to_yaml()?)?;
    println!("{} {}", "✅ Wrote".bold().green(), path.display());

    Ok(())
}

/// Sample model placed at the configured cells
pub fn template_workbook(layout: &LayoutConfig) -> MemorySpreadsheet {
    let mut sheets = MemorySpreadsheet::new();
    let input = sheets.sheet_mut(&layout.input_sheet);
    input.set(layout.objective, "+5X1+4X2+3X3");

    let samples = [("2X1+3X2+X3", "<=", 5.0), ("4X1+X2+2X3", "<=", 11.0)];
    for (((lhs, op, rhs), l), (o, r)) in samples
        .iter()
        .zip(layout.constraints.cells())
        .zip(layout.operators.cells().zip(layout.rhs.cells()))
    {
        input.set(l, *lhs);
        input.set(o, *op);
        input.set(r, *rhs);
    }

    sheets.sheet_mut(&layout.output_sheet);
    sheets
}
