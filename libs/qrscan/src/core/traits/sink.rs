// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::error::Result;

/// Display sink for the live video stream.
///
/// `bind` is called once per successful acquisition and returns only after
/// the stream metadata is ready (first-frame dimensions known); the
/// controller does not enter the scanning state before that. `unbind` is
/// called on stop.
pub trait PreviewSink {
    fn bind(&mut self, dimensions: (u32, u32)) -> Result<()>;

    fn unbind(&mut self);
}

/// No-op preview for headless use (CLI, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPreview;

impl PreviewSink for NullPreview {
    fn bind(&mut self, _dimensions: (u32, u32)) -> Result<()> {
        Ok(())
    }

    fn unbind(&mut self) {}
}

/// Receives each newly decoded payload, exactly once per distinct
/// consecutive value (the controller owns the duplicate suppression).
pub trait ResultSink {
    fn publish(&mut self, payload: &str);
}
