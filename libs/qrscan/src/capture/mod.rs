// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Capture source implementations.

#[cfg(feature = "camera")]
pub mod nokhwa;

#[cfg(feature = "camera")]
pub use nokhwa::{list_devices, DeviceInfo, NokhwaCaptureSource, NokhwaStream};
