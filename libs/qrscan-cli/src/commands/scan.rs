// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use qrscan::capture::NokhwaCaptureSource;
use qrscan::core::{Facing, NullPreview, RefreshClock, ResultSink, ScanConfig, ScanController};
use qrscan::decode::RqrrDecoder;
use qrscan::ui::{CopyControl, LatestPayload};

use crate::clipboard::Osc52Clipboard;

#[derive(Args)]
pub struct ScanArgs {
    /// Camera facing preference (front | rear)
    #[arg(long, value_enum)]
    facing: Option<FacingArg>,

    /// Scan loop pacing rate in Hz
    #[arg(long)]
    fps: Option<f64>,

    /// Copy each newly decoded payload to the terminal clipboard (OSC 52)
    #[arg(long)]
    copy: bool,

    /// Config file (TOML); flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum FacingArg {
    Front,
    Rear,
}

impl From<FacingArg> for Facing {
    fn from(arg: FacingArg) -> Self {
        match arg {
            FacingArg::Front => Facing::Front,
            FacingArg::Rear => Facing::Rear,
        }
    }
}

/// Prints each payload and feeds the shared latest-payload slot; optionally
/// copies to the terminal clipboard as well.
struct TerminalSink {
    latest: LatestPayload,
    copy: Option<CopyControl<Osc52Clipboard>>,
}

impl ResultSink for TerminalSink {
    fn publish(&mut self, payload: &str) {
        println!("{payload}");
        self.latest.publish(payload);

        if let Some(control) = &mut self.copy {
            control.copy(Some(payload));
            if let Some(status) = control.status() {
                eprintln!("{status}");
            }
        }
    }
}

pub fn run(args: ScanArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            ScanConfig::from_toml_str(&raw)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        }
        None => ScanConfig::default(),
    };

    if let Some(facing) = args.facing {
        config.facing = facing.into();
    }
    if let Some(fps) = args.fps {
        config.refresh_rate_hz = fps;
    }

    let latest = LatestPayload::new();
    let sink = TerminalSink {
        latest: latest.clone(),
        copy: args.copy.then(|| CopyControl::new(Osc52Clipboard::new())),
    };

    let mut clock = RefreshClock::new(config.refresh_rate_hz);
    let mut controller = ScanController::new(
        NokhwaCaptureSource::new(),
        NullPreview,
        RqrrDecoder::new(),
        sink,
        config,
    );

    // Ctrl+C requests a cooperative stop; the loop checks once per frame.
    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })
    .context("Failed to install Ctrl+C handler")?;

    controller
        .start()
        .context("No camera found or access denied")?;
    eprintln!("Scanning... press Ctrl+C to stop.");

    controller.run(&mut clock, || stop_rx.try_recv().is_ok());

    match latest.get() {
        Some(payload) => info!(%payload, "scan stopped"),
        None => info!("scan stopped, nothing decoded"),
    }
    controller.dispose();

    Ok(())
}
