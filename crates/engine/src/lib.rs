//! Game loop for the platformer.
//!
//! The loop is cooperative and single-threaded: [`run_animation`] awaits one
//! refresh tick at a time and [`LevelRunner`] drives a level per loop,
//! moving through the level list as levels are won.
//!
//! Everything outside the loop (ticks, the screen, keys, the wall clock)
//! comes in through traits so the loop runs the same against a terminal or
//! a test double.

pub mod animation;
pub mod sequencer;

pub use tui_platformer_core as core;
pub use tui_platformer_term as term;
pub use tui_platformer_types as types;

pub use animation::{frame_delta, run_animation, Flow, FrameSource};
pub use sequencer::{
    InputSource, LevelOutcome, LevelPlay, LevelRunner, Screen, SystemClock, WallClock,
};
