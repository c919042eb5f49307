// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::traits::CaptureStream;

/// Exclusive owner of an active device stream.
///
/// Exists only between a successful acquisition and the matching stop; at
/// most one is alive at a time, enforced by the controller state machine.
pub struct CaptureSession<S: CaptureStream> {
    stream: S,
}

impl<S: CaptureStream> CaptureSession<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Tear down: stop every underlying track and drop the handle.
    pub fn close(mut self) {
        self.stream.release();
    }
}
