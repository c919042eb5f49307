// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Frame pacing for the scan loop.
//!
//! The loop runs once per rendered display frame, not on a fixed timer. On
//! platforms with a real vsync primitive (CVDisplayLink, DRM vsync) an
//! implementation can block on that; [`RefreshClock`] is the portable
//! software stand-in that paces to a configured refresh rate with absolute
//! deadlines so the cadence does not drift.

use std::thread;
use std::time::{Duration, Instant};

/// Passive pacing reference for the scan loop.
///
/// The clock never calls into the controller; the driver loop asks it to
/// block until the next frame boundary after each completed iteration, so
/// iterations stay strictly sequential.
pub trait FrameClock {
    /// Block until the next frame boundary.
    fn wait_next_frame(&mut self);

    /// Refresh rate in Hz (e.g. 60.0).
    fn rate_hz(&self) -> f64;

    /// Human-readable name for logs.
    fn description(&self) -> &str {
        "Frame Clock"
    }
}

/// Software refresh-rate clock.
pub struct RefreshClock {
    rate_hz: f64,
    interval: Duration,
    next_deadline: Option<Instant>,
    description: String,
}

impl RefreshClock {
    pub const DEFAULT_RATE_HZ: f64 = 60.0;

    pub fn new(rate_hz: f64) -> Self {
        let rate_hz = if rate_hz.is_finite() && rate_hz >= 1.0 {
            rate_hz
        } else {
            Self::DEFAULT_RATE_HZ
        };

        Self {
            rate_hz,
            interval: Duration::from_secs_f64(1.0 / rate_hz),
            next_deadline: None,
            description: format!("Refresh Clock ({rate_hz:.0} Hz)"),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RefreshClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_HZ)
    }
}

impl FrameClock for RefreshClock {
    fn wait_next_frame(&mut self) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now + self.interval);

        if deadline > now {
            thread::sleep(deadline - now);
        }

        // Absolute stepping keeps the long-run cadence exact; if an
        // iteration overran a full frame, resync instead of burst-firing.
        let next = deadline + self.interval;
        self.next_deadline = Some(if next < Instant::now() {
            Instant::now() + self.interval
        } else {
            next
        });
    }

    fn rate_hz(&self) -> f64 {
        self.rate_hz
    }

    fn description(&self) -> &str {
        &self.description
    }
}
