// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::frame::Frame;

/// The decoding primitive. Pure and synchronous; the controller treats it
/// as a black box and never looks inside a frame itself.
///
/// `None` is a decode miss - a normal, frequent loop outcome, never an
/// error. Implementations are expected to return promptly (bounded by one
/// frame's worth of pixels).
pub trait Decoder {
    fn decode(&self, frame: &Frame) -> Option<String>;
}
