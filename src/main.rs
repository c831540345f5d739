//! MCP Server Entry Point
//!
//! This is the main entry point for the MCP server. It initializes logging,
//! loads configuration, and starts the server with the configured transport.

use anyhow::Result;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use genai_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // logging first, so configuration warnings are visible
    dotenvy::dotenv().ok();
    init_logging(&std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

    let config = Config::from_env();

    info!(
        "Starting {} v{} (log level {})",
        config.server.name, config.server.version, config.logging.level
    );
    debug!("Configuration: {:?}", config);

    let server = McpServer::new(config.clone())?;

    info!(
        "Server initialized with toolset {:?}: {:?}",
        config.tools.toolset,
        server.registry().tool_names()
    );

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize tracing on stderr; stdout belongs to the STDIO transport.
///
/// `RUST_LOG` directives are honored, with `level` added on top.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
