//! Sumi-Gateway main entry point
//!
//! This is the command-line interface that serves the bundled crawler library
//! over HTTP.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sumi_gateway::config::{load_config_with_hash, validate, Config};
use sumi_gateway::library::SumiLibrary;
use sumi_gateway::routes::RouteTable;
use sumi_gateway::{build_router, server, synthesize, GatewayError};
use tracing_subscriber::EnvFilter;

/// Sumi-Gateway: crawler functions as HTTP routes
///
/// Every exported crawler function is served at GET /api/<kebab-name>, with
/// its parameters taken from the query string. GET /api lists all routes.
#[derive(Parser, Debug)]
#[command(name = "sumi-gateway")]
#[command(version)]
#[command(about = "Serve crawler library functions over HTTP", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding the config file
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print the synthesized routes and exit without listening
    #[arg(long)]
    list_routes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let table = match build_table(&config) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!("Failed to build routes: {}", e);
            return Err(e.into());
        }
    };

    if cli.list_routes {
        print_routes(&table);
        return Ok(());
    }

    let addr = config.server.socket_addr()?;
    let router = build_router(table);

    if let Err(e) = server::serve(addr, router).await {
        tracing::error!("Server failed on {}: {}", addr, e);
        return Err(e.into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::new(server::log_directive(verbose, quiet));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, then applies CLI overrides
fn load(cli: &Cli) -> Result<Config, GatewayError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    validate(&config)?;

    Ok(config)
}

/// Builds the crawler library and synthesizes its routes
fn build_table(config: &Config) -> Result<RouteTable, GatewayError> {
    let library = SumiLibrary::new(config)?;
    let table = synthesize(&library)?;
    tracing::info!("Synthesized {} routes", table.len());
    Ok(table)
}

fn print_routes(table: &RouteTable) {
    println!("GET /api");
    for entry in table.iter() {
        println!("GET {}  [{}]", entry.path, entry.doc_params().join(", "));
    }
}
