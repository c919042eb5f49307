// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Collaborator seams consumed by the scan controller.
//!
//! Each trait mirrors one external interface of the system: the capture
//! device source, the display/preview sink, the decoding primitive, the
//! result sink, and the clipboard. The controller is generic over all of
//! them, so tests drive it with hand-rolled fakes and the CLI wires in the
//! real camera and decoder.

pub mod capture;
pub mod clipboard;
pub mod decode;
pub mod sink;

pub use capture::{CaptureSource, CaptureStream, Facing};
pub use clipboard::Clipboard;
pub use decode::Decoder;
pub use sink::{NullPreview, PreviewSink, ResultSink};
