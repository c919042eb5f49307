// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::error::CaptureError;

/// One captured video frame, reduced to 8-bit luma for the decoder.
///
/// Frames are ephemeral: a new one is rendered every scan-loop iteration at
/// the stream's *current* dimensions (the source may change resolution
/// between frames) and dropped at the end of the iteration.
#[derive(Clone)]
pub struct Frame {
    /// Frame width in pixels
    pub width: u32,

    /// Frame height in pixels
    pub height: u32,

    /// Row-major luma pixels, `width * height` bytes
    pub data: Vec<u8>,

    /// Sequential frame number within the owning stream
    pub frame_number: u64,

    /// Wall-clock timestamp in nanoseconds
    pub timestamp_ns: i64,
}

impl Frame {
    /// Wrap an already-grayscale pixel buffer.
    pub fn from_luma(
        width: u32,
        height: u32,
        data: Vec<u8>,
        frame_number: u64,
    ) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(CaptureError::Conversion(format!(
                "luma buffer is {} bytes, expected {} for {}x{}",
                data.len(),
                expected,
                width,
                height
            )));
        }

        Ok(Self {
            width,
            height,
            data,
            frame_number,
            timestamp_ns: now_ns(),
        })
    }

    /// Convert an RGBA buffer to luma (integer BT.601 weights).
    pub fn from_rgba(
        width: u32,
        height: u32,
        rgba: &[u8],
        frame_number: u64,
    ) -> Result<Self, CaptureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(CaptureError::Conversion(format!(
                "RGBA buffer is {} bytes, expected {} for {}x{}",
                rgba.len(),
                expected,
                width,
                height
            )));
        }

        let data = rgba
            .chunks_exact(4)
            .map(|px| {
                let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
                ((77 * r + 150 * g + 29 * b) >> 8) as u8
            })
            .collect();

        Self::from_luma(width, height, data, frame_number)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frame_number", &self.frame_number)
            .field("timestamp_ns", &self.timestamp_ns)
            .finish()
    }
}

fn now_ns() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(0)
}
