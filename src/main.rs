use clap::{Parser, Subcommand};
use lpsheet::api::run_api_server;
use lpsheet::cli;
use lpsheet::config::AppConfig;
use lpsheet::logging::init_tracing;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lpsheet")]
#[command(about = "Binary linear programs read from, and answered into, a spreadsheet.")]
#[command(long_about = "lpsheet - Binary integer programs kept in a workbook

The objective goes in one cell, constraints go in three parallel columns
(expression, operator, right-hand side). Every variable X1..XN is 0 or 1.
The optimal assignment, objective value and per-constraint slack are
written back as a three-column table.

EXPRESSIONS:
  +3X1-2X2+X3     signed coefficient, the letter X, a 1-based index
  X4              coefficient defaults to 1 (or -1 after a bare '-')

COMMANDS:
  solve        - Read the model, solve it, write the result table
  parse        - Show how one expression is understood
  serve        - Start the HTTP trigger server
  init-config  - Write a config file (and optionally a sample workbook)

EXAMPLES:
  lpsheet init-config lpsheet.yaml --workbook model.xlsx
  lpsheet solve --dry-run
  lpsheet solve --workbook model.xlsx --output result.xlsx
  lpsheet parse \"+5X1+4X2-3X3\"
  lpsheet serve --port 3000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Solve the model stored in the workbook.

Reads the objective and constraint columns from the input sheet, finds the
optimal 0/1 assignment and rewrites the output area:

  Solution | Objective Value | Slack/Surplus

If no optimal solution exists the single cell
'No optimal solution found.' is written instead.

Use --dry-run to print the table without saving the workbook.")]
    /// Solve the model and write the result table
    Solve {
        /// Config file (defaults to ./lpsheet.yaml when present)
        #[arg(short, long, env = "LPSHEET_CONFIG")]
        config: Option<PathBuf>,

        /// Input workbook, overrides the config
        #[arg(short, long)]
        workbook: Option<PathBuf>,

        /// Output workbook, overrides the config (defaults to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result instead of writing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show variable values and slacks
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a linear expression and print its coefficients
    Parse {
        /// Expression such as "+3X1-2X2+X3"
        expression: String,
    },

    #[command(long_about = "Start the HTTP server.

  GET  /               - Status text
  GET  /trigger        - Run the solver, reply with a one-line message
  GET  /health         - Health check
  GET  /version        - Version and workbook info
  POST /api/v1/solve   - Run the solver, reply with JSON
  POST /api/v1/parse   - Parse an expression, reply with JSON

Set RUST_LOG to adjust logging (default: lpsheet=info,tower_http=info).")]
    /// Start the HTTP trigger server
    Serve {
        /// Host address to bind to, overrides the config
        #[arg(short = 'H', long, env = "LPSHEET_HOST")]
        host: Option<String>,

        /// Port to listen on, overrides the config
        #[arg(short, long, env = "LPSHEET_PORT")]
        port: Option<u16>,

        /// Config file (defaults to ./lpsheet.yaml when present)
        #[arg(short, long, env = "LPSHEET_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Write a default config file
    InitConfig {
        /// Where to write the config
        #[arg(default_value = "lpsheet.yaml")]
        path: PathBuf,

        /// Also create a sample workbook at this path
        #[arg(short, long)]
        workbook: Option<PathBuf>,
    },
}

fn serve(host: Option<String>, port: Option<u16>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = AppConfig::load_or_default(config.as_deref())?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    init_tracing("lpsheet=info,tower_http=info");
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_api_server(config))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            workbook,
            output,
            dry_run,
            verbose,
        } => {
            init_tracing("lpsheet=warn");
            let config = cli::resolve_config(config, workbook, output)?;
            cli::solve(&config, dry_run, verbose)?;
        }

        Commands::Parse { expression } => cli::parse(&expression)?,

        Commands::Serve { host, port, config } => serve(host, port, config)?,

        Commands::InitConfig { path, workbook } => cli::init_config(&path, workbook)?,
    }

    Ok(())
}
