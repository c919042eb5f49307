// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! qrscan CLI
//!
//! Scans the camera for QR codes and prints each newly decoded payload.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod clipboard;
mod commands;

#[derive(Parser)]
#[command(name = "qrscan")]
#[command(author, version, about = "Camera QR scanner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available capture devices
    Devices,

    /// Scan for QR codes until Ctrl+C
    Scan(commands::scan::ScanArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Devices => commands::devices::run(),
        Commands::Scan(args) => commands::scan::run(args),
    }
}
