use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub type LpSheetResult<T> = Result<T, LpSheetError>;

/// Where an expression came from on the input sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "row", rename_all = "snake_case")]
pub enum ExprLocation {
    /// The objective cell
    Objective,
    /// A constraint row (1-based sheet row number)
    Constraint(u32),
}

impl fmt::Display for ExprLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprLocation::Objective => write!(f, "objective"),
            ExprLocation::Constraint(row) => write!(f, "constraint row {}", row),
        }
    }
}

/// Failures while scanning an algebraic expression
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ParseError {
    #[error("no terms found in '{text}'")]
    Empty { text: String },

    #[error("invalid coefficient '{coefficient}' on X{index}")]
    InvalidCoefficient { coefficient: String, index: String },

    #[error("variable indices start at 1, found X0")]
    ZeroIndex,

    #[error("invalid variable index 'X{index}'")]
    InvalidIndex { index: String },

    #[error("only ASCII digits 0-9 are accepted, found '{digit}'")]
    NonAsciiDigit { digit: char },
}

/// Failures while assembling parsed rows into a model
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum ModelError {
    /// `row` is the constraint's lhs row, `cell` the operator cell
    #[error("row {row}: unknown operator '{operator}' in {cell} (expected <=, = or >=)")]
    UnknownOperator { row: u32, cell: String, operator: String },

    #[error("row {row}: X{index} is not declared by the objective (X1..X{declared})")]
    UnknownVariable { row: u32, index: u32, declared: usize },

    #[error("row {row}: right-hand side '{value}' in {cell} is not a number")]
    InvalidRhs { row: u32, cell: String, value: String },
}

#[derive(Error, Debug)]
pub enum LpSheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("Parse error in {location}: {source}")]
    Parse {
        location: ExprLocation,
        #[source]
        source: ParseError,
    },

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Solver error: {0}")]
    Oracle(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LpSheetError {
    pub fn parse(location: ExprLocation, source: ParseError) -> Self {
        LpSheetError::Parse { location, source }
    }

    /// Stable tag used by the JSON API
    pub fn kind(&self) -> &'static str {
        match self {
            LpSheetError::Io(_) => "io",
            LpSheetError::Yaml(_) => "config",
            LpSheetError::Config(_) => "config",
            LpSheetError::Workbook(_) => "workbook",
            LpSheetError::Parse { .. } => "parse",
            LpSheetError::Model(_) => "model",
            LpSheetError::Oracle(_) => "oracle",
            LpSheetError::Internal(_) => "internal",
        }
    }
}
