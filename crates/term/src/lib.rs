//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. Frames are
//! composed into a pixel [`Canvas`] and presented as half-block cells in a
//! [`FrameBuffer`], which the [`TerminalRenderer`] flushes with diffs.
//!
//! Goals:
//! - Keep camera, sprite selection and composition pure and testable
//! - Draw through the [`Surface`] trait so tests can record draw calls
//! - Square-ish pixels in a terminal (one cell = 1x2 pixels)

pub mod atlas;
pub mod canvas;
pub mod display;
pub mod fb;
pub mod renderer;
pub mod sprite;
pub mod viewport;

pub use tui_platformer_core as core;
pub use tui_platformer_types as types;

pub use atlas::{Atlas, AtlasError, SpriteSheet};
pub use canvas::{Canvas, Rect, Sprite, Surface};
pub use display::{status_color, Display, DisplayConfig};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use viewport::Viewport;
