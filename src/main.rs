//! Plex Assistant - MCP server entry point
//!
//! Wires the environment config, the HTTP backend, and the tool registry
//! into a stdio MCP server. The `check` command runs the same adapter
//! against the live server and prints what it finds.

use clap::{Parser, Subcommand};
use plex_assistant_core::{
    error::{PlexError, Result},
    HttpBackend, McpServer, PlexClient, PlexConfig, ToolHandler,
};
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(name = "plex-assistant")]
#[command(about = "MCP server exposing a Plex media server to AI assistants", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server (stdio mode)
    Serve,

    /// Connect to the configured Plex server and print what it finds
    Check {
        /// Query used for the sample search
        #[arg(long, default_value = "matrix")]
        query: String,
    },
}

/// Build the client adapter from the environment config.
fn build_client() -> Result<PlexClient> {
    let config = PlexConfig::from_env()?;
    let backend = HttpBackend::new(&config);
    Ok(PlexClient::new(Arc::new(backend)))
}

/// Start MCP server in stdio mode
async fn start_mcp_server() -> Result<()> {
    debug!("Starting MCP server...");

    let client = build_client()?;
    let tool_handler = ToolHandler::new(client);
    let server = McpServer::new(tool_handler);

    // Run server with graceful shutdown on signals
    tokio::select! {
        result = server.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal, stopping MCP server gracefully...");
        }
    }

    info!("MCP server shut down complete");
    Ok(())
}

/// Connect and walk every read-only operation, printing the results
async fn run_check(query: &str) -> Result<()> {
    let client = build_client()?;

    println!("🔌 Testing Plex connection...");
    if !client.test_connection().await {
        println!("❌ Connection test failed");
        return Err(PlexError::Other("connection test failed".to_string()));
    }
    println!("✅ Connection successful!");

    if let Some(info) = client.get_server_info().await {
        println!("\n📡 Server Information:");
        println!("   name: {}", info.friendly_name);
        println!("   version: {}", info.version);
        println!("   platform: {} {}", info.platform, info.platform_version);
        println!("   identifier: {}", info.machine_identifier);
    }

    println!("\n📚 Libraries:");
    for library in client.get_libraries().await {
        println!(
            "   - {} ({}): {} items",
            library.title, library.kind, library.count
        );
    }

    if let Some(stats) = client.get_library_statistics().await {
        println!("\n📊 Library Statistics:");
        println!("   Total items: {}", stats.total_items);
        println!("   By type:");
        for (media_type, count) in &stats.by_type {
            println!("      - {}: {}", media_type, count);
        }
    }

    println!("\n🔍 Sample search ('{}'):", query);
    let results = client.search(query, 5).await;
    if results.is_empty() {
        println!("   No results found");
    } else {
        for result in &results {
            println!("   - {} ({})", result.title, result.kind);
        }
    }

    println!("\n👥 Currently Playing:");
    let sessions = client.get_currently_playing().await;
    if sessions.is_empty() {
        println!("   Nobody is watching anything right now");
    } else {
        for session in &sessions {
            println!("   - {} ({})", session.title, session.kind);
            println!("     User: {}", session.user);
            if session.duration > 0 {
                println!(
                    "     Progress: {}s / {}s",
                    session.view_offset / 1000,
                    session.duration / 1000
                );
            }
        }
    }

    println!("\n📋 Playlists:");
    let playlists = client.get_playlists().await;
    if playlists.is_empty() {
        println!("   No playlists found");
    } else {
        for playlist in &playlists {
            println!(
                "   - {} ({}): {} items",
                playlist.title, playlist.playlist_type, playlist.item_count
            );
        }
    }

    println!("\n✅ All checks completed");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Use the specified level for this crate, WARN for noisy HTTP internals
    let filter = EnvFilter::new(format!(
        "plex_assistant={level},plex_assistant_core={level},hyper=warn,reqwest=warn",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("Plex Assistant v{} starting...", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Commands::Check { query }) => run_check(&query).await,
        Some(Commands::Serve) | None => start_mcp_server().await,
    }
}
