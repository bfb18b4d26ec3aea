//! CLI for build identifiers.
//!
//! Provides commands for:
//! - Decoding identifiers and /b/ URLs into named loadouts
//! - Encoding named loadouts
//! - Upgrading, validating and inspecting identifiers
//! - Batch upgrades of identifier lists

mod cli;
mod commands;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use build_id_core::{BuildCodec, CodecConfig};
use clap::Parser;
use tracing::Level;

use crate::cli::Cli;

fn load_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match &cli.config {
        Some(path) => CodecConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CodecConfig::default(),
    };
    config
        .apply_env_overrides()
        .context("Invalid environment override")?;
    if let Some(registry) = &cli.registry {
        config.registry_path = registry.clone();
    }
    Ok(config)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let codec = BuildCodec::from_config(&config).with_context(|| {
        format!(
            "Failed to initialize codec with registry {}",
            config.registry_path.display()
        )
    })?;

    let ok = commands::run(&codec, cli.command, &mut io::stdout().lock())?;
    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
