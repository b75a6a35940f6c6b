//! Command line HTTP client built on kfetch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kfetch::{CancellationToken, Kfetch};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod config;
mod env_vars;
mod hooks;
mod sub_commands;

use crate::config::Settings;
use crate::sub_commands::request::{RequestSubCommand, Verb};

/// Send HTTP requests relative to a configured base URL
#[derive(Parser)]
#[command(name = "kfetch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file (defaults to ./kfetch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Logging level
    #[arg(short, long, default_value = "warn")]
    log_level: Level,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a GET request
    Get(RequestSubCommand),
    /// Send a POST request
    Post(RequestSubCommand),
    /// Send a PATCH request
    Patch(RequestSubCommand),
    /// Send a DELETE request
    Delete(RequestSubCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    let hyper_filter = "hyper=warn";
    let env_filter = EnvFilter::new(format!("{},{}", args.log_level, hyper_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::load(args.config.as_deref())?;
    tracing::debug!("Loaded settings: {:?}", settings);

    let client = Kfetch::new(settings.to_options());

    // Ctrl-C aborts the in-flight request
    let signal = CancellationToken::new();
    let ctrl_c = signal.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let (verb, sub_command_args) = match &args.command {
        Commands::Get(sub_command_args) => (Verb::Get, sub_command_args),
        Commands::Post(sub_command_args) => (Verb::Post, sub_command_args),
        Commands::Patch(sub_command_args) => (Verb::Patch, sub_command_args),
        Commands::Delete(sub_command_args) => (Verb::Delete, sub_command_args),
    };

    sub_commands::request::request(&client, verb, sub_command_args, signal).await
}
