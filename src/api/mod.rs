//! lpsheet API Server module
//!
//! HTTP trigger for the spreadsheet workflow, plus a JSON API.
//! Run with `lpsheet serve` or `lpsheet-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, AppState};
