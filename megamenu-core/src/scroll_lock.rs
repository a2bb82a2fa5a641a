// SPDX-License-Identifier: MIT OR Apache-2.0
//! Body scroll lock.
//!
//! The lock is document-wide state with last-writer-wins semantics. The host
//! application owns it and hands it to the controller, which lets tests swap
//! in a recording fake.

use crate::host::{markers, Host};

/// Locks and unlocks scrolling of the document body.
pub trait ScrollLockManager {
    /// Pin the viewport at the top. Locking twice keeps the first recorded
    /// offset.
    fn lock(&mut self, host: &mut dyn Host);

    /// Release the lock and restore the recorded offset. No-op when unlocked.
    fn unlock(&mut self, host: &mut dyn Host);

    /// Whether the lock is held.
    fn is_locked(&self) -> bool;
}

/// Scroll lock implemented with a body class and a transform.
#[derive(Debug, Default)]
pub struct BodyScrollLock {
    recorded: Option<f64>,
}

impl BodyScrollLock {
    /// Create an unlocked instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset recorded by the last lock, while locked.
    pub fn recorded_offset(&self) -> Option<f64> {
        self.recorded
    }
}

impl ScrollLockManager for BodyScrollLock {
    fn lock(&mut self, host: &mut dyn Host) {
        if self.recorded.is_some() {
            log::debug!("Body scroll already locked");
            return;
        }
        let offset = host.scroll_y();
        let body = host.body();
        self.recorded = Some(offset);
        host.set_data(body, markers::DATA_SCROLL_TOP, &offset.to_string());
        host.scroll_to(0.0);
        host.add_class(body, markers::NO_SCROLL);
        host.set_style(body, "transform", &format!("translateY(-{}px)", offset));
    }

    fn unlock(&mut self, host: &mut dyn Host) {
        let Some(offset) = self.recorded.take() else {
            return;
        };
        let body = host.body();
        host.remove_class(body, markers::NO_SCROLL);
        host.remove_style(body, "transform");
        host.remove_data(body, markers::DATA_SCROLL_TOP);
        host.scroll_to(offset);
    }

    fn is_locked(&self) -> bool {
        self.recorded.is_some()
    }
}
