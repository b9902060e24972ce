//! Quill admin binary.
//!
//! Resolves configuration, sets up logging, and runs one operator command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use quill_core::config::load_config;
use quill_core::tracing_init::init_tracing;
use quill_server::admin_cmd::{self, AdminAction};

#[derive(Parser)]
#[command(name = "quill")]
#[command(version, about = "Quill admin tool - password hashes and session tokens")]
struct Args {
    /// Path to a JSON settings file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JWT secret key (overrides config and environment).
    #[arg(long, global = true)]
    jwt_secret: Option<String>,

    /// Output logs as JSON (for structured log aggregation).
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    action: AdminAction,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(secret) = args.jwt_secret {
        config.auth.jwt_secret = secret;
    }
    if args.log_json {
        config.log.json = true;
    }

    init_tracing(&format!("quill={}", config.log.level), config.log.json);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting quill");
    debug!(
        secret_configured = !config.auth.jwt_secret.is_empty(),
        "Configuration resolved"
    );

    let mut stdout = std::io::stdout().lock();
    let ok = admin_cmd::run(args.action, &config.auth.jwt_secret, &mut stdout)?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
