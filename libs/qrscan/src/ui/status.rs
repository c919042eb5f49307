// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::time::{Duration, Instant};

use tracing::warn;

use crate::core::traits::Clipboard;

/// How long a copy status stays visible before it clears itself.
pub const STATUS_TTL: Duration = Duration::from_secs(2);

/// Copy-to-clipboard control with a transient status line.
///
/// With nothing to copy (empty or whitespace payload) the clipboard is
/// never touched and the status says so; otherwise the write outcome is
/// reported. Statuses expire after [`STATUS_TTL`] - readers polling
/// [`CopyControl::status`] simply stop seeing them.
pub struct CopyControl<C: Clipboard> {
    clipboard: C,
    status: Option<(String, Instant)>,
    ttl: Duration,
}

impl<C: Clipboard> CopyControl<C> {
    pub fn new(clipboard: C) -> Self {
        Self::with_ttl(clipboard, STATUS_TTL)
    }

    pub fn with_ttl(clipboard: C, ttl: Duration) -> Self {
        Self {
            clipboard,
            status: None,
            ttl,
        }
    }

    /// Copy the currently displayed payload. Returns whether a clipboard
    /// write succeeded.
    pub fn copy(&mut self, displayed: Option<&str>) -> bool {
        self.copy_at(displayed, Instant::now())
    }

    /// Like [`copy`](Self::copy) with an injected timestamp, for tests.
    pub fn copy_at(&mut self, displayed: Option<&str>, now: Instant) -> bool {
        let text = displayed.map(str::trim).filter(|text| !text.is_empty());
        let Some(text) = text else {
            self.status = Some(("Nothing to copy.".to_owned(), now));
            return false;
        };

        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.status = Some(("Copied to clipboard.".to_owned(), now));
                true
            }
            Err(err) => {
                warn!(%err, "clipboard write failed");
                self.status = Some(("Copy failed.".to_owned(), now));
                false
            }
        }
    }

    /// Current status text, if it has not expired.
    pub fn status(&self) -> Option<&str> {
        self.status_at(Instant::now())
    }

    pub fn status_at(&self, now: Instant) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|(_, set_at)| now.saturating_duration_since(*set_at) < self.ttl)
            .map(|(text, _)| text.as_str())
    }
}
