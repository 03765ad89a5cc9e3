use serde::Serialize;
use std::fmt;

//==============================================================================
// Model Types
//==============================================================================

/// Comparison operator of a constraint row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "<=")]
    Le,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = ">=")]
    Ge,
}

impl Operator {
    /// Recognise an operator cell. Surrounding whitespace is ignored,
    /// anything other than `<=`, `=` or `>=` is rejected.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "<=" => Some(Operator::Le),
            "=" => Some(Operator::Eq),
            ">=" => Some(Operator::Ge),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Le => "<=",
            Operator::Eq => "=",
            Operator::Ge => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One `coefficient * x[variable]` term. `variable` is the 0-based
/// position in the variable vector (`X1` is 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Term {
    pub coefficient: f64,
    pub variable: usize,
}

impl Term {
    pub fn new(coefficient: f64, variable: usize) -> Self {
        Self {
            coefficient,
            variable,
        }
    }
}

/// A linear constraint read from one sheet row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub terms: Vec<Term>,
    pub operator: Operator,
    pub rhs: f64,
    /// 1-based sheet row of the left-hand side
    pub row: u32,
    /// Left-hand side text as written in the sheet
    pub source: String,
}

impl Constraint {
    /// Left-hand side value under a binary assignment
    pub fn evaluate(&self, values: &[u8]) -> f64 {
        self.terms
            .iter()
            .map(|t| t.coefficient * f64::from(values.get(t.variable).copied().unwrap_or(0)))
            .sum()
    }

    /// Slack for `<=`, surplus for `>=`, zero for `=`
    pub fn slack(&self, values: &[u8]) -> f64 {
        let total = self.evaluate(values);
        match self.operator {
            Operator::Le => self.rhs - total,
            Operator::Ge => total - self.rhs,
            Operator::Eq => 0.0,
        }
    }
}

/// Binary maximisation model
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Model {
    /// Objective coefficient of X1..XN, in order
    pub objective: Vec<f64>,
    pub constraints: Vec<Constraint>,
}

impl Model {
    pub fn variable_count(&self) -> usize {
        self.objective.len()
    }

    /// Objective value under a binary assignment
    pub fn objective_value(&self, values: &[u8]) -> f64 {
        self.objective
            .iter()
            .zip(values)
            .map(|(c, v)| c * f64::from(*v))
            .sum()
    }
}

//==============================================================================
// Spreadsheet Cells
//==============================================================================

/// A single spreadsheet value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Int(i64),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Cell content as the text a user would see in the sheet
    pub fn as_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

/// Rectangular block of cells, row-major
pub type Table = Vec<Vec<Cell>>;
