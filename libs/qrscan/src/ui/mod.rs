// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Presentation collaborators: latest-payload slot, clipboard copy control,
//! theme toggle. None of these touch the scan core's state.

pub mod latest;
pub mod status;
pub mod theme;

pub use latest::LatestPayload;
pub use status::CopyControl;
pub use theme::Theme;
