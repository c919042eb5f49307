// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crate::core::error::ClipboardError;

/// Clipboard write access. Out of the scan core proper - consumed only by
/// the copy control in [`crate::ui::status`].
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
