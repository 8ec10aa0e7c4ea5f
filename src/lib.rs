//! TUI Platformer (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_platformer::{core,engine,input,term,types}`
//! and adds the terminal host the binary runs on.

pub use tui_platformer_core as core;
pub use tui_platformer_engine as engine;
pub use tui_platformer_input as input;
pub use tui_platformer_term as term;
pub use tui_platformer_types as types;

pub mod config;
pub mod host;
pub mod logging;

pub use config::Config;
pub use host::{IntervalFrames, QuitRequested, TerminalInput, TerminalScreen};
