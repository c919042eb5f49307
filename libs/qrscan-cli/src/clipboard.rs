// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use qrscan::core::{Clipboard, ClipboardError};

/// Terminal clipboard via the OSC 52 escape sequence.
///
/// Works over SSH and in every terminal that supports OSC 52 (most modern
/// ones); the terminal itself performs the system clipboard write.
#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for Osc52Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let encoded = STANDARD.encode(text.as_bytes());
        let mut out = std::io::stdout().lock();
        write!(out, "\x1b]52;c;{encoded}\x07")
            .and_then(|_| out.flush())
            .map_err(|err| ClipboardError::WriteFailed(err.to_string()))
    }
}
