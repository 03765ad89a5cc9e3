//! API request handlers

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::server::AppState;
use crate::core::{error_message, RunOutcome};
use crate::error::LpSheetError;
use crate::parser::parse_expression;

/// Static text of the status endpoint
pub const ROOT_MESSAGE: &str = "🟢 Server active! Visit /trigger to start the solver.";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(error),
        }
    }
}

/// Structured failure carried by [`ApiResponse`]
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Stable tag: parse, model, workbook, oracle, config, io, internal
    pub kind: String,
    pub message: String,
    /// Variant-specific data (location, offending text, row numbers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&LpSheetError> for ApiError {
    fn from(error: &LpSheetError) -> Self {
        let details = match error {
            LpSheetError::Parse { location, source } => Some(serde_json::json!({
                "location": location,
                "error": source,
            })),
            LpSheetError::Model(model) => serde_json::to_value(model).ok(),
            _ => None,
        };
        Self {
            kind: error.kind().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

/// GET / - Static status text
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// GET /trigger - Run the pipeline, reply with a human-readable message
pub async fn trigger(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.run_pipeline().await {
        Ok(outcome) => (StatusCode::OK, outcome.message()),
        Err(e) => {
            tracing::error!(kind = e.kind(), "run failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, error_message(&e))
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub workbook: String,
    pub input_sheet: String,
    pub output_sheet: String,
}

/// GET /version - Server version and the workbook it serves
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        workbook: state.config.workbook.input.display().to_string(),
        input_sheet: state.config.layout.input_sheet.clone(),
        output_sheet: state.config.layout.output_sheet.clone(),
    }))
}

/// Solve response
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SolveResponse {
    /// `optimal` or `no_optimal_solution`
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<f64>,
    pub values: Vec<u8>,
    pub slacks: Vec<f64>,
    pub message: String,
    pub solved_at: DateTime<Utc>,
}

impl From<&RunOutcome> for SolveResponse {
    fn from(outcome: &RunOutcome) -> Self {
        let message = outcome.message();
        let solved_at = Utc::now();
        match outcome {
            RunOutcome::Solved(report) => Self {
                status: "optimal".to_string(),
                objective: Some(report.objective),
                values: report.values.clone(),
                slacks: report.slacks.clone(),
                message,
                solved_at,
            },
            RunOutcome::NoOptimalSolution => Self {
                status: "no_optimal_solution".to_string(),
                objective: None,
                values: Vec::new(),
                slacks: Vec::new(),
                message,
                solved_at,
            },
        }
    }
}

/// POST /api/v1/solve - Run the pipeline, reply with structured JSON
pub async fn solve(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.run_pipeline().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(ApiResponse::ok(SolveResponse::from(&outcome))),
        ),
        Err(e) => {
            let status = match e {
                LpSheetError::Parse { .. } | LpSheetError::Model(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(ApiResponse::err(ApiError::from(&e))))
        }
    }
}

/// Parse request
#[derive(Deserialize)]
pub struct ParseRequest {
    pub expression: String,
}

/// Parse response
#[derive(Serialize, Debug, PartialEq)]
pub struct ParseResponse {
    /// Canonical form of the expression
    pub canonical: String,
    /// Coefficient per 1-based variable index
    pub coefficients: BTreeMap<u32, f64>,
}

/// POST /api/v1/parse - Parse one expression without touching the workbook
pub async fn parse(Json(req): Json<ParseRequest>) -> impl IntoResponse {
    match parse_expression(&req.expression) {
        Ok(coefficients) => (
            StatusCode::OK,
            Json(ApiResponse::ok(ParseResponse {
                canonical: coefficients.to_string(),
                coefficients: coefficients.iter().collect(),
            })),
        ),
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::err(ApiError {
                kind: "parse".to_string(),
                message: e.to_string(),
                details: serde_json::to_value(&e).ok(),
            })),
        ),
    }
}
