// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

/// Device acquisition failures (permission denied, no device, backend
/// error). Surfaced once to the caller; scanning does not start and the
/// attempt is not retried automatically.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("no capture device found")]
    NoDevice,

    #[error("camera access denied: {0}")]
    AccessDenied(String),

    #[error("capture device error: {0}")]
    Device(String),
}

/// Per-frame capture failures. Inside the scan loop these are logged and
/// treated as a missed frame; a decode miss is *not* an error at all.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("frame read failed: {0}")]
    FrameRead(String),

    #[error("frame conversion failed: {0}")]
    Conversion(String),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("nothing to copy")]
    NothingToCopy,

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("camera acquisition failed: {0}")]
    Acquisition(#[from] AcquireError),

    #[error("capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("preview sink error: {0}")]
    Preview(String),

    #[error("clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
