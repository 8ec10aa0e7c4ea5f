//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events onto the tracked key set (left, right, jump) and
//! keeps a live held-key table that the loop samples once per tick.

pub mod map;
pub mod tracker;

pub use tui_platformer_types as types;

pub use map::{should_quit, tracked_key};
pub use tracker::{KeyTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
