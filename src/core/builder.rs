use crate::error::{ExprLocation, LpSheetError, LpSheetResult, ModelError, ParseError};
use crate::excel::{CellRef, ColumnRange};
use crate::parser::parse_expression;
use crate::types::{Cell, Constraint, Model, Operator};

/// Raw text of one constraint row as read from the sheet
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    /// 1-based sheet row of the left-hand side
    pub row: u32,
    pub lhs: String,
    pub operator: String,
    pub rhs: String,
    /// Where the operator was read from
    pub operator_cell: CellRef,
    /// Where the right-hand side was read from
    pub rhs_cell: CellRef,
}

impl ConstraintRow {
    /// Row with its three cells side by side (columns A, B, C) on sheet row `row`
    pub fn new(
        row: u32,
        lhs: impl Into<String>,
        operator: impl Into<String>,
        rhs: impl Into<String>,
    ) -> Self {
        let row0 = row.saturating_sub(1);
        Self {
            row,
            lhs: lhs.into(),
            operator: operator.into(),
            rhs: rhs.into(),
            operator_cell: CellRef::new(row0, 1),
            rhs_cell: CellRef::new(row0, 2),
        }
    }

    /// Zip three aligned column reads into rows, pairing the i-th cell of
    /// each range. The shortest column bounds the row count.
    pub fn zip_columns(ranges: [ColumnRange; 3], columns: [&[Cell]; 3]) -> Vec<Self> {
        let [lhs_range, op_range, rhs_range] = ranges;
        let [lhs, operators, rhs] = columns;

        lhs_range
            .cells()
            .zip(op_range.cells())
            .zip(rhs_range.cells())
            .zip(lhs.iter().zip(operators).zip(rhs))
            .map(|(((l_at, o_at), r_at), ((l, o), r))| Self {
                row: l_at.sheet_row(),
                lhs: l.as_text(),
                operator: o.as_text(),
                rhs: r.as_text(),
                operator_cell: o_at,
                rhs_cell: r_at,
            })
            .collect()
    }

    fn is_blank(&self) -> bool {
        self.lhs.trim().is_empty() && self.operator.trim().is_empty() && self.rhs.trim().is_empty()
    }
}

/// Assemble the objective text and constraint rows into a [`Model`].
///
/// The objective fixes the variable count N (its highest index). Constraints
/// may only reference X1..XN. Fully blank rows are skipped.
pub fn build_model(objective: &str, rows: &[ConstraintRow]) -> LpSheetResult<Model> {
    let parsed = parse_expression(objective)
        .map_err(|e| LpSheetError::parse(ExprLocation::Objective, e))?;
    let declared = parsed.max_index() as usize;

    let mut model = Model {
        objective: parsed.dense(declared),
        constraints: Vec::with_capacity(rows.len()),
    };

    for row in rows.iter().filter(|r| !r.is_blank()) {
        model.constraints.push(build_constraint(row, declared)?);
    }

    Ok(model)
}

fn build_constraint(row: &ConstraintRow, declared: usize) -> LpSheetResult<Constraint> {
    let location = ExprLocation::Constraint(row.row);
    if row.lhs.trim().is_empty() {
        return Err(LpSheetError::parse(
            location,
            ParseError::Empty {
                text: row.lhs.clone(),
            },
        ));
    }

    let coefficients = parse_expression(&row.lhs).map_err(|e| LpSheetError::parse(location, e))?;

    if let Some((index, _)) = coefficients.iter().find(|(i, _)| *i as usize > declared) {
        return Err(ModelError::UnknownVariable {
            row: row.row,
            index,
            declared,
        }
        .into());
    }

    let operator = Operator::parse(&row.operator).ok_or_else(|| ModelError::UnknownOperator {
        row: row.row,
        cell: row.operator_cell.to_string(),
        operator: row.operator.clone(),
    })?;

    let rhs: f64 = row
        .rhs
        .trim()
        .parse()
        .map_err(|_| ModelError::InvalidRhs {
            row: row.row,
            cell: row.rhs_cell.to_string(),
            value: row.rhs.clone(),
        })?;

    Ok(Constraint {
        terms: coefficients.terms(),
        operator,
        rhs,
        row: row.row,
        source: row.lhs.clone(),
    })
}
