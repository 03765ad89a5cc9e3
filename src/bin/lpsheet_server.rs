//! lpsheet API Server binary
//!
//! Standalone HTTP server for the spreadsheet solver workflow.

use clap::Parser;
use lpsheet::api::run_api_server;
use lpsheet::config::AppConfig;
use lpsheet::logging::init_tracing;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "lpsheet-server")]
#[command(version)]
#[command(about = "lpsheet API Server - HTTP trigger for the spreadsheet solver")]
#[command(long_about = r#"
lpsheet API Server

Each trigger reads the model from the configured workbook, solves it and
writes the result table back.

Endpoints:
  - GET  /               - Status text
  - GET  /trigger        - Run the solver (plain-text reply)
  - GET  /health         - Health check
  - GET  /version        - Server version info
  - POST /api/v1/solve   - Run the solver (JSON reply)
  - POST /api/v1/parse   - Parse one expression (JSON reply)

Example usage:
  lpsheet-server                             # Start on 127.0.0.1:3000
  lpsheet-server --host 0.0.0.0 --port 8080
  lpsheet-server --config lpsheet.yaml

  curl http://localhost:3000/trigger
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, env = "LPSHEET_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "LPSHEET_PORT")]
    port: Option<u16>,

    /// Config file (defaults to ./lpsheet.yaml when present)
    #[arg(short, long, env = "LPSHEET_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load_or_default(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing("lpsheet=info,tower_http=info");
    run_api_server(config).await
}
