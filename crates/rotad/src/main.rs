//! rotad: the pharmacy rota daemon.
//!
//! Loads `rota.toml`, builds the schedule engine, opens the row store
//! (seeding the roster on first run) and serves the REST API.
//!
//! # Usage
//!
//! ```text
//! rotad serve --config rota.toml --port 8080 --data-dir /var/lib/rota
//! rotad query --role Pharmacist1 --day Monday --hour 11
//! rotad config
//! ```

mod serve;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rota_core::{DayOfWeek, Engine, Role, RotaConfig, labels, parse_hour};

const DEFAULT_CONFIG: &str = "rota.toml";

#[derive(Parser)]
#[command(name = "rotad", about = "Pharmacy staff rota daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the REST API.
    Serve {
        /// Path to rota.toml. Defaults apply when omitted and ./rota.toml is absent.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides [server] port).
        #[arg(long)]
        port: Option<u16>,

        /// Data directory for the row store (overrides [server] data_dir).
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Emit logs as JSON lines.
        #[arg(long)]
        log_json: bool,
    },

    /// Answer availability and task for one cell.
    Query {
        #[arg(long)]
        role: Role,

        #[arg(long)]
        day: DayOfWeek,

        #[arg(long)]
        hour: u8,

        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML.
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Logs go to stderr so `query` and `config` output stays clean.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rotad=debug,rota=debug"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Explicit path must exist; otherwise ./rota.toml is used if present,
/// else the built-in defaults.
fn load_config(path: Option<&Path>) -> anyhow::Result<RotaConfig> {
    match path {
        Some(path) => RotaConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG);
            if fallback.exists() {
                RotaConfig::from_file(fallback)
                    .with_context(|| format!("loading config from {DEFAULT_CONFIG}"))
            } else {
                info!("no config file, using built-in defaults");
                Ok(RotaConfig::default())
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            data_dir,
            log_json,
        } => {
            init_tracing(log_json);
            let mut config = load_config(config.as_deref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.server.data_dir = data_dir;
            }
            serve::run(config).await
        }
        Command::Query {
            role,
            day,
            hour,
            config,
        } => {
            init_tracing(false);
            let hour = parse_hour(hour)?;
            let config = load_config(config.as_deref())?;
            let engine = Engine::from_config(&config)?;
            let answer = serde_json::json!({
                "role": role,
                "day": day,
                "hour": labels::hour_label(hour),
                "available": engine.is_available(role, day, hour),
                "task": engine.task_for(role, day, hour),
            });
            println!("{}", serde_json::to_string_pretty(&answer)?);
            Ok(())
        }
        Command::Config { config } => {
            init_tracing(false);
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
