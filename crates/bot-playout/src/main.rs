//! Playout bot - a UCI engine that scores moves by random playouts.
//!
//! stdout carries the protocol, so logs go to stderr. Set `RUST_LOG` to
//! change the log level (default `info`).

mod config;
mod playout;
mod session;

use clap::Parser;
use config::BotConfig;
use session::Session;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uci::{stdio_engine, UciEngine};

/// UCI chess bot that picks moves by random playouts.
#[derive(Parser)]
#[command(name = "playout-bot")]
#[command(about = "UCI chess bot that picks moves by random playouts")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    tracing::info!(name = %config.name, seed = ?config.seed, "starting");

    let UciEngine { input, mut output } = stdio_engine();
    Session::new(config).run(input, &mut output)?;

    tracing::info!("bye");
    Ok(())
}
