// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use anyhow::{Context, Result};

pub fn run() -> Result<()> {
    let devices = qrscan::capture::list_devices().context("Failed to enumerate capture devices")?;

    if devices.is_empty() {
        println!("No capture devices found.");
        return Ok(());
    }

    println!("Available capture devices:");
    for device in devices {
        if device.description.is_empty() {
            println!("  [{}] {}", device.index, device.name);
        } else {
            println!("  [{}] {} ({})", device.index, device.name, device.description);
        }
    }

    Ok(())
}
