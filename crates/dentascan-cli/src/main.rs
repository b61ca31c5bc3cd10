//! DentaScan CLI
//!
//! Main entry point for serving the DentaScan site.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use dentascan_web::{create_router, AppState, Config};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// DentaScan - Dental Health Analysis Server
///
/// Serves the DentaScan site: upload a tooth photo for AI segmentation,
/// browse dental condition guides, and find partner clinics in Jakarta.
#[derive(Parser, Debug)]
#[command(name = "dentascan")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (default: dentascan.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Host address to bind the web server to
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Port for the web server
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Base URL of the segmentation service
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing subscriber with appropriate filter
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("DentaScan starting");
    tracing::debug!(config = ?args.config, "Config file");
    tracing::debug!(api_url = ?args.api_url, "Segmentation service override");

    // Run the server and handle errors
    match run_server(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Runs the DentaScan web server.
///
/// This function drives the whole startup sequence:
/// 1. Load config and apply CLI overrides
/// 2. Build the shared application state
/// 3. Probe the segmentation service once
/// 4. Serve the site until Ctrl+C
async fn run_server(args: Args) -> anyhow::Result<()> {
    // Load configuration
    let mut config = load_config(args.config.as_deref())?;

    // Apply CLI argument overrides
    if let Some(ref api_url) = args.api_url {
        config.inference.base_url.clone_from(api_url);
    }
    if let Some(ref host) = args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Re-validate after overrides
    config.validate()?;

    print_config(&config);

    let bind_address = config.server.bind_address();
    let state = AppState::new(config)?;

    // Probe the segmentation service so a dead backend shows up in the logs
    // at startup instead of on the first upload
    println!();
    println!(
        "Checking segmentation service at {}...",
        state.inference.base_url()
    );
    match state.inference.check_health().await {
        Ok(_) => println!("Segmentation service is online"),
        Err(e) => {
            tracing::warn!(error = %e, "Segmentation service health check failed");
            println!("Segmentation service is offline: {e}");
            println!("Uploads stay disabled until it comes back; the other pages still work");
        }
    }

    let router = create_router(state);

    // Start the web server
    println!();
    println!("Starting web server on {bind_address}...");

    let listener = TcpListener::bind(bind_address.as_str()).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to bind to {bind_address}: {e}\n\nSuggestion: Try a different port with --port"
        )
    })?;

    // Spawn the server in the background
    let mut server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "HTTP server error");
        }
    });

    println!("DentaScan running on http://{bind_address}");
    println!();
    println!("  Home     http://{bind_address}/");
    println!("  Upload   http://{bind_address}/upload");
    println!("  Learn    http://{bind_address}/learn");
    println!("  Clinics  http://{bind_address}/clinics");
    println!();
    println!("Press Ctrl+C to stop");

    // Wait for Ctrl+C or an unexpected server exit
    tokio::select! {
        Ok(()) = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        _ = &mut server_handle => {
            anyhow::bail!(
                "HTTP server stopped unexpectedly\n\nSuggestion: Check the logs above for details"
            );
        }
    }

    println!();
    println!("Shutting down...");
    server_handle.abort();
    println!("Server stopped");

    Ok(())
}

/// Loads configuration from the given path or falls back to defaults.
fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    match config_path {
        Some(path_str) => {
            let path = Path::new(path_str);
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

/// Prints the loaded configuration.
fn print_config(config: &Config) {
    println!("Configuration loaded:");
    println!("  Segmentation service: {}", config.inference.base_url);
    println!(
        "  Health check timeout: {}s",
        config.inference.health_timeout_secs
    );
    println!(
        "  Analysis timeout: {}s",
        config.inference.submit_timeout_secs
    );
    println!("  Bind address: {}", config.server.bind_address());
    if let Some(ref archive) = config.archive {
        println!(
            "  Archive: {} (bucket: {})",
            archive.base_url, archive.storage_bucket
        );
    }
}
