//! HTTP front end for the translation store.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use fanyi_core::settings::{Settings, SettingsError};

mod web;

#[derive(Parser)]
#[command(name = "fanyid", about = "Translation dictionary HTTP API", version)]
struct Args {
    /// Path to a settings TOML file; embedded defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the CSV store path from settings
    #[arg(long)]
    store: Option<PathBuf>,

    /// Override the listen address from settings
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(err) => {
            error!("failed to load settings: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = web::serve(settings).await {
        error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn load_settings(args: &Args) -> Result<Settings, SettingsError> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::embedded_defaults(),
    };
    if let Some(store) = &args.store {
        settings.store.path = store.clone();
    }
    if let Some(addr) = args.addr {
        settings.server.addr = addr;
    }
    Ok(settings)
}
