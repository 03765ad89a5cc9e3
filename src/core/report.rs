use crate::types::{Cell, Model, Table};
use serde::Serialize;

/// Header row of the result table
pub const HEADERS: [&str; 3] = ["Solution", "Objective Value", "Slack/Surplus"];

/// Written to the output sheet when there is no optimum
pub const NO_OPTIMAL_MARKER: &str = "No optimal solution found.";

/// Slack (`<=`), surplus (`>=`) or zero (`=`) per constraint, in order
pub fn slacks(model: &Model, values: &[u8]) -> Vec<f64> {
    model.constraints.iter().map(|c| c.slack(values)).collect()
}

/// Solved model, ready for the output sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub values: Vec<u8>,
    pub objective: f64,
    pub slacks: Vec<f64>,
}

impl SolveReport {
    pub fn new(model: &Model, values: Vec<u8>, objective: f64) -> Self {
        let slacks = slacks(model, &values);
        Self {
            values,
            objective,
            slacks,
        }
    }

    /// Result table in the output sheet's layout:
    ///
    /// ```text
    /// Solution | Objective Value | Slack/Surplus
    /// x1       | z               | s1
    /// x2       |                 | s2
    /// ...
    /// ```
    ///
    /// The table has `max(variables, constraints)` data rows; cells past the
    /// end of a column are empty.
    pub fn table(&self) -> Table {
        let rows = self.values.len().max(self.slacks.len());
        let mut table: Table = Vec::with_capacity(rows + 1);
        table.push(HEADERS.iter().map(|&h| Cell::from(h)).collect());

        for i in 0..rows {
            let value = self
                .values
                .get(i)
                .map_or(Cell::Empty, |&v| Cell::Int(i64::from(v)));
            let objective = if i == 0 {
                Cell::Number(self.objective)
            } else {
                Cell::Empty
            };
            let slack = self.slacks.get(i).map_or(Cell::Empty, |&s| Cell::Number(s));
            table.push(vec![value, objective, slack]);
        }

        table
    }
}

/// Single-cell table written when the model has no optimum
pub fn no_solution_table() -> Table {
    vec![vec![Cell::from(NO_OPTIMAL_MARKER)]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::{build_model, ConstraintRow};

    #[test]
    fn test_slacks_by_operator() {
        let model = build_model(
            "X1+X2",
            &[
                ConstraintRow::new(24, "X1+X2", "<=", "3"),
                ConstraintRow::new(25, "2X1", ">=", "1"),
                ConstraintRow::new(26, "X2", "=", "1"),
            ],
        )
        .unwrap();
        assert_eq!(slacks(&model, &[1, 1]), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_table_more_variables_than_constraints() {
        let model = build_model("X1+X2+X3", &[ConstraintRow::new(24, "X1", "<=", "1")]).unwrap();
        let report = SolveReport::new(&model, vec![1, 0, 1], 2.0);
        assert_eq!(
            report.table(),
            vec![
                vec![
                    Cell::from("Solution"),
                    Cell::from("Objective Value"),
                    Cell::from("Slack/Surplus")
                ],
                vec![Cell::Int(1), Cell::Number(2.0), Cell::Number(0.0)],
                vec![Cell::Int(0), Cell::Empty, Cell::Empty],
                vec![Cell::Int(1), Cell::Empty, Cell::Empty],
            ]
        );
    }

    #[test]
    fn test_table_more_constraints_than_variables() {
        let model = build_model(
            "X1",
            &[
                ConstraintRow::new(24, "X1", "<=", "1"),
                ConstraintRow::new(25, "X1", ">=", "0"),
            ],
        )
        .unwrap();
        let table = SolveReport::new(&model, vec![1], 1.0).table();
        assert_eq!(table.len(), 3);
        assert_eq!(table[2], vec![Cell::Empty, Cell::Empty, Cell::Number(1.0)]);
    }

    #[test]
    fn test_no_solution_table() {
        assert_eq!(no_solution_table(), vec![vec![Cell::from(NO_OPTIMAL_MARKER)]]);
    }
}
