// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::clock::RefreshClock;
use crate::core::error::{Result, ScanError};
use crate::core::traits::Facing;

/// Scan controller configuration.
///
/// Deliberately small: device *selection* beyond the facing hint is out of
/// scope, and there is nothing to tune in the loop itself beyond the pacing
/// rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Facing preference passed to the capture source on acquisition.
    pub facing: Facing,

    /// Scan loop pacing rate for the software frame clock.
    pub refresh_rate_hz: f64,
}

impl ScanConfig {
    /// Parse a TOML config document; absent fields take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|err| ScanError::Configuration(err.to_string()))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            facing: Facing::Rear,
            refresh_rate_hz: RefreshClock::DEFAULT_RATE_HZ,
        }
    }
}
