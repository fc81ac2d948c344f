//! Unitform MCP Server
//!
//! Line-delimited JSON-RPC over stdio. One request per line on stdin, one
//! response per line on stdout; logs go to stderr.

mod config;
mod server;

use std::io;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use unitform_engine::ConverterRegistry;

use config::{init_logging, ServerConfig};
use server::{Server, PROTOCOL_VERSION, SERVER_VERSION};

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = ServerConfig::from_env();
    init_logging(&config);

    let server = Server::new(ConverterRegistry::standard());

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Unitform MCP server started");
    info!(filter = %config.log_filter, format = ?config.log_format, "logging configured");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    info!("server ready, waiting for requests");

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                // EOF - client disconnected
                info!("client disconnected (EOF)");
                break;
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                return Err(e);
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = server.handle_line(line) else {
            continue;
        };

        let mut payload = serde_json::to_string(&response)?;
        payload.push('\n');
        if let Err(e) = write_line(&mut stdout, &payload).await {
            error!(error = %e, "error writing response");
            return Err(e);
        }
    }

    info!("server shutting down");
    Ok(())
}

async fn write_line(stdout: &mut tokio::io::Stdout, payload: &str) -> io::Result<()> {
    stdout.write_all(payload.as_bytes()).await?;
    stdout.flush().await
}
