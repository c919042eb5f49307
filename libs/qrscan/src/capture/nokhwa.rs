// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Native camera capture via nokhwa.
//!
//! The facing preference is honored with a device-name heuristic: desktop
//! backends do not expose front/rear metadata, so we match common
//! substrings and fall back to the first enumerated device.

use ::nokhwa::pixel_format::LumaFormat;
use ::nokhwa::query;
use ::nokhwa::utils::{ApiBackend, CameraIndex, CameraInfo, RequestedFormat, RequestedFormatType};
use ::nokhwa::Camera;
use tracing::{debug, warn};

use crate::core::error::{AcquireError, CaptureError};
use crate::core::frame::Frame;
use crate::core::traits::{CaptureSource, CaptureStream, Facing};

const REAR_HINTS: [&str; 3] = ["back", "rear", "environment"];
const FRONT_HINTS: [&str; 3] = ["front", "user", "face"];

/// An enumerated capture device, for user-facing listings.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: String,
    pub name: String,
    pub description: String,
}

/// List the capture devices the platform exposes.
pub fn list_devices() -> Result<Vec<DeviceInfo>, AcquireError> {
    let devices = query(ApiBackend::Auto).map_err(map_acquire_err)?;
    Ok(devices
        .iter()
        .map(|info| DeviceInfo {
            index: info.index().to_string(),
            name: info.human_name(),
            description: info.description().to_string(),
        })
        .collect())
}

/// Capture source backed by the platform's native camera stack.
#[derive(Debug, Default)]
pub struct NokhwaCaptureSource;

impl NokhwaCaptureSource {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureSource for NokhwaCaptureSource {
    type Stream = NokhwaStream;

    fn acquire(&mut self, facing: Facing) -> Result<NokhwaStream, AcquireError> {
        let devices = query(ApiBackend::Auto).map_err(map_acquire_err)?;
        if devices.is_empty() {
            return Err(AcquireError::NoDevice);
        }

        let index = pick_device(&devices, facing);
        debug!(%index, ?facing, "opening capture device");

        let requested =
            RequestedFormat::new::<LumaFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(index, requested).map_err(map_acquire_err)?;
        camera.open_stream().map_err(map_acquire_err)?;

        Ok(NokhwaStream {
            camera: Some(camera),
            frame_number: 0,
        })
    }
}

/// An open camera stream. Tracks stop on `release` (and on drop, as a
/// backstop).
pub struct NokhwaStream {
    camera: Option<Camera>,
    frame_number: u64,
}

impl CaptureStream for NokhwaStream {
    fn dimensions(&self) -> (u32, u32) {
        match &self.camera {
            Some(camera) => {
                let resolution = camera.resolution();
                (resolution.width(), resolution.height())
            }
            None => (0, 0),
        }
    }

    fn render_frame(&mut self) -> Result<Frame, CaptureError> {
        let camera = self
            .camera
            .as_mut()
            .ok_or_else(|| CaptureError::FrameRead("stream already released".into()))?;

        let buffer = camera
            .frame()
            .map_err(|err| CaptureError::FrameRead(err.to_string()))?;
        let luma = buffer
            .decode_image::<LumaFormat>()
            .map_err(|err| CaptureError::Conversion(err.to_string()))?;

        self.frame_number += 1;
        Frame::from_luma(luma.width(), luma.height(), luma.into_raw(), self.frame_number)
    }

    fn release(&mut self) {
        if let Some(mut camera) = self.camera.take() {
            if let Err(err) = camera.stop_stream() {
                warn!(%err, "failed to stop camera stream");
            }
        }
    }
}

impl Drop for NokhwaStream {
    fn drop(&mut self) {
        self.release();
    }
}

fn pick_device(devices: &[CameraInfo], facing: Facing) -> CameraIndex {
    let hints = match facing {
        Facing::Rear => &REAR_HINTS,
        Facing::Front => &FRONT_HINTS,
    };

    devices
        .iter()
        .find(|info| {
            let name = info.human_name().to_ascii_lowercase();
            hints.iter().any(|hint| name.contains(hint))
        })
        .unwrap_or(&devices[0])
        .index()
        .clone()
}

fn map_acquire_err(err: ::nokhwa::NokhwaError) -> AcquireError {
    let message = err.to_string();
    let lowered = message.to_ascii_lowercase();
    if lowered.contains("permission") || lowered.contains("denied") {
        AcquireError::AccessDenied(message)
    } else {
        AcquireError::Device(message)
    }
}
