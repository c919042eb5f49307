// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use tracing::trace;

use crate::core::frame::Frame;
use crate::core::traits::Decoder;

/// QR decoding via rqrr - the black-box decoding primitive.
///
/// Every failure mode (no grid in the frame, a grid that fails to decode,
/// even a malformed buffer) collapses into a miss; the scan loop never sees
/// a decode error.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for RqrrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let gray = image::GrayImage::from_raw(frame.width, frame.height, frame.data.clone())?;
        let mut prepared = ::rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();
        let grid = grids.first()?;

        match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(err) => {
                trace!(%err, "grid detected but decode failed");
                None
            }
        }
    }
}
