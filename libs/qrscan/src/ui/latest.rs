// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::traits::ResultSink;

/// Result sink that keeps the most recently published payload in a shared
/// slot, so a copy control (or any other reader) can pick it up later.
/// Clones share the same slot.
#[derive(Clone, Default)]
pub struct LatestPayload {
    slot: Arc<Mutex<Option<String>>>,
}

impl LatestPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl ResultSink for LatestPayload {
    fn publish(&mut self, payload: &str) {
        *self.slot.lock() = Some(payload.to_owned());
    }
}
