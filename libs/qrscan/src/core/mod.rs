// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Scan controller core: lifecycle state machine, scan loop, collaborator
//! traits, frames, clocks, errors, and configuration.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod frame;
pub mod session;
pub mod traits;

pub use clock::{FrameClock, RefreshClock};
pub use config::ScanConfig;
pub use controller::{ScanController, StartTicket, Step};
pub use error::{AcquireError, CaptureError, ClipboardError, Result, ScanError};
pub use frame::Frame;
pub use session::CaptureSession;
pub use traits::{
    CaptureSource, CaptureStream, Clipboard, Decoder, Facing, NullPreview, PreviewSink, ResultSink,
};
