mod config;
mod http;
mod logging;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use city_ops::CityOpsModule;
use clap::{Parser, Subcommand};

use crate::config::{AppConfig, CliOverrides};

/// CivitasIQ API server - smart city operations backend
#[derive(Parser)]
#[command(name = "civitas-server")]
#[command(about = "CivitasIQ API server - smart city operations backend")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref()
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });
    config.validate(cli.mock)?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    logging::init(&config.logging)?;
    if config.auth.uses_default_secret() {
        tracing::warn!("auth.secret_key is the built-in placeholder; issued tokens are forgeable");
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => {
            tracing::info!("Configuration checked");
            println!("Configuration is valid");
            println!("{}", config.to_pretty_json()?);
            Ok(())
        }
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "CivitasIQ API starting");
    let addr = config.bind_addr()?;

    let db = city_ops::connect(&config.database.url, config.database.max_connections)
        .await
        .context("failed to connect to database")?;
    CityOpsModule::migrate(&db)
        .await
        .context("failed to apply migrations")?;

    let AppConfig {
        server,
        auth,
        city_ops,
        ..
    } = config;
    let module = CityOpsModule::new(&db, &city_ops, auth);
    let app = http::with_layers(module.router(), &server);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(signals::shutdown_signal())
        .await
        .context("server error")?;

    if let Err(e) = db.close().await {
        tracing::warn!(error = %e, "Failed to close database pool");
    }
    tracing::info!("CivitasIQ API stopped");
    Ok(())
}
