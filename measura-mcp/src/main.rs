//! Measura MCP Server
//!
//! Line-delimited JSON-RPC over stdin/stdout. Logs go to stderr.
//!
//! Tools:
//! - convert: Convert a value within Length, Weight or Temperature
//! - list_categories: List unit categories
//! - list_units: List (and search) the units of a category
//! - help: Documentation for the conversion functions

mod config;
mod server;

use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;
use server::handle_line;

fn init_logging(config: &ServerConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn write_line(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()
}

fn main() {
    let config = ServerConfig::from_env();
    init_logging(&config);

    let registry = measura_units::standard_registry();

    info!(version = config.version, protocol = config.protocol_version, "Measura MCP server started");
    debug!(
        stdin_terminal = io::stdin().is_terminal(),
        stdout_terminal = io::stdout().is_terminal(),
        "stdio attached"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("Client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                if let Some(response) = handle_line(&registry, &config, &line) {
                    if let Err(e) = write_line(&response) {
                        error!(error = %e, "Error writing response");
                        break;
                    }
                    debug!("Sent response");
                }
            }
            Err(e) => {
                error!(error = %e, "Error reading input");
                break;
            }
        }
    }

    info!("Server shutting down");
}
