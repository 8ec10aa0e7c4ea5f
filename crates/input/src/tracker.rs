//! Held-key tracking for terminals with or without key release events.
//!
//! Terminals speaking the keyboard enhancement protocol report releases, and
//! the tracker follows them exactly. Plain terminals only send presses and
//! auto-repeats; for those a release timeout turns "no event for a while"
//! into a release.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::tracked_key;
use crate::types::{Key, Keys};

/// Default release timeout; long enough to bridge a typical auto-repeat delay.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 500;

#[derive(Debug, Clone, Default)]
pub struct KeyTracker {
    /// Last press/repeat time per tracked key, `None` when released.
    held_since: [Option<u64>; 3],
    release_timeout_ms: Option<u64>,
}

impl KeyTracker {
    /// Tracker for terminals that report key releases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for terminals without release events.
    pub fn with_release_timeout_ms(timeout_ms: u64) -> Self {
        Self {
            release_timeout_ms: Some(timeout_ms),
            ..Self::default()
        }
    }

    pub fn release_timeout_ms(&self) -> Option<u64> {
        self.release_timeout_ms
    }

    /// Apply one device event.
    ///
    /// Returns `true` when the key is tracked, meaning the event is consumed
    /// and must not trigger any other handling.
    pub fn handle_key_event(&mut self, key: KeyEvent, now_ms: u64) -> bool {
        let Some(tracked) = tracked_key(key.code) else {
            return false;
        };
        let slot = &mut self.held_since[tracked.index()];
        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => *slot = Some(now_ms),
            KeyEventKind::Release => *slot = None,
        }
        true
    }

    /// Release keys whose last event is older than the release timeout.
    pub fn expire(&mut self, now_ms: u64) {
        let Some(timeout) = self.release_timeout_ms else {
            return;
        };
        for slot in &mut self.held_since {
            if matches!(*slot, Some(at) if now_ms.saturating_sub(at) >= timeout) {
                *slot = None;
            }
        }
    }

    pub fn release_all(&mut self) {
        self.held_since = [None; 3];
    }

    /// Current held state of every tracked key.
    pub fn keys(&self) -> Keys {
        let mut keys = Keys::default();
        for key in Key::ALL {
            keys.set(key, self.held_since[key.index()].is_some());
        }
        keys
    }
}
