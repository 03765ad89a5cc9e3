//! Model building, solving and result reporting

pub mod builder;
pub mod oracle;
pub mod pipeline;
pub mod report;

pub use builder::{build_model, ConstraintRow};
pub use oracle::{MicrolpOracle, Oracle, OracleOutcome};
pub use pipeline::{error_message, read_model, run, run_workbook, RunOutcome};
pub use report::{SolveReport, HEADERS, NO_OPTIMAL_MARKER};
