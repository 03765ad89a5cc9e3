use crate::error::{LpSheetError, LpSheetResult};
use crate::types::{Model, Operator, Term};
use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::debug;

/// What the solver reports for a binary maximisation model
#[derive(Debug, Clone, PartialEq)]
pub enum OracleOutcome {
    /// Optimal 0/1 assignment and its objective value
    Optimal { values: Vec<u8>, objective: f64 },
    /// Infeasible or unbounded
    NotOptimal,
}

/// Binary integer programming backend
///
/// Every variable of the model is binary, and the objective is maximised.
pub trait Oracle: Send + Sync {
    fn solve(&self, model: &Model) -> LpSheetResult<OracleOutcome>;
}

/// Branch-and-bound via good_lp's pure-Rust microlp backend
#[derive(Debug, Clone, Copy, Default)]
pub struct MicrolpOracle;

impl MicrolpOracle {
    pub fn new() -> Self {
        Self
    }
}

fn linear(vars: &[Variable], terms: impl IntoIterator<Item = Term>) -> Expression {
    let mut expr = Expression::with_capacity(vars.len());
    for term in terms {
        expr.add_mul(term.coefficient, vars[term.variable]);
    }
    expr
}

impl Oracle for MicrolpOracle {
    fn solve(&self, model: &Model) -> LpSheetResult<OracleOutcome> {
        let mut problem = ProblemVariables::new();
        let vars: Vec<Variable> = (0..model.variable_count())
            .map(|i| problem.add(variable().binary().name(format!("x{}", i + 1))))
            .collect();

        let objective = linear(
            &vars,
            model
                .objective
                .iter()
                .enumerate()
                .map(|(i, &c)| Term::new(c, i)),
        );

        let mut lp = problem.maximise(objective).using(microlp);
        for c in &model.constraints {
            let lhs = linear(&vars, c.terms.iter().copied());
            lp.add_constraint(match c.operator {
                Operator::Le => constraint::leq(lhs, c.rhs),
                Operator::Eq => constraint::eq(lhs, c.rhs),
                Operator::Ge => constraint::geq(lhs, c.rhs),
            });
        }

        match lp.solve() {
            Ok(solution) => {
                let values: Vec<u8> = vars
                    .iter()
                    .map(|&v| u8::from(solution.value(v) > 0.5))
                    .collect();
                let objective = model.objective_value(&values);
                debug!(?values, objective, "microlp found optimum");
                Ok(OracleOutcome::Optimal { values, objective })
            }
            Err(ResolutionError::Infeasible) | Err(ResolutionError::Unbounded) => {
                debug!("microlp reports no optimum");
                Ok(OracleOutcome::NotOptimal)
            }
            Err(e) => Err(LpSheetError::Oracle(e.to_string())),
        }
    }
}
