// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

use crate::core::error::{AcquireError, CaptureError};
use crate::core::frame::Frame;

/// Camera facing preference. A hint, not a guarantee: platforms without the
/// distinction (most desktops) fall back to whatever device is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Front,
    Rear,
}

impl Default for Facing {
    fn default() -> Self {
        Facing::Rear
    }
}

/// Capture device source: hands out at most one active stream at a time.
///
/// `acquire` may block while the platform grants or denies access; it is
/// the only suspension point in the whole system. Failures are terminal to
/// the attempt (no automatic retry).
pub trait CaptureSource {
    type Stream: CaptureStream;

    fn acquire(&mut self, facing: Facing) -> Result<Self::Stream, AcquireError>;
}

/// An active device video stream.
pub trait CaptureStream {
    /// Current stream dimensions. Re-read every scan-loop iteration; the
    /// source may change resolution between frames.
    fn dimensions(&self) -> (u32, u32);

    /// Render the current video image into a fresh off-screen pixel buffer
    /// sized to the current dimensions.
    fn render_frame(&mut self) -> Result<Frame, CaptureError>;

    /// Stop every underlying device track. Idempotent.
    fn release(&mut self);
}
