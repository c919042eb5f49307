// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Camera QR scanning.
//!
//! The heart of the crate is [`core::ScanController`]: it owns the capture
//! session lifecycle (idle/active), drives the capture → decode → dedupe
//! cycle paced by a [`core::FrameClock`], and publishes newly decoded
//! payloads to a [`core::ResultSink`]. Everything pixel-level is delegated
//! to a [`core::Decoder`] implementation ([`decode::RqrrDecoder`] by
//! default); camera access goes through a [`core::CaptureSource`]
//! ([`capture::nokhwa`], behind the `camera` feature).

pub mod capture;
pub mod core;
pub mod decode;
pub mod ui;

pub use crate::core::{
    AcquireError, CaptureError, CaptureSession, CaptureSource, CaptureStream, ClipboardError,
    Clipboard, Decoder, Facing, Frame, FrameClock, NullPreview, PreviewSink, RefreshClock, Result,
    ResultSink, ScanConfig, ScanController, ScanError, StartTicket, Step,
};
pub use crate::decode::RqrrDecoder;
pub use crate::ui::{CopyControl, LatestPayload, Theme};
