//! Core game logic module - level plans and the simulation collaborator
//!
//! This crate holds everything the renderer and loop consume but never look
//! inside. It has **zero dependencies** on terminals, input devices, or
//! timing sources, making it:
//!
//! - **Deterministic**: the same plan and seed always produce the same run
//! - **Testable**: plain values in, plain values out
//! - **Swappable**: the loop only talks to the [`Simulation`] trait
//!
//! # Module Structure
//!
//! - [`level`]: textual plan parser producing an immutable tile grid
//! - [`simulation`]: the snapshot interface the loop drives
//! - [`state`]: reference arcade ruleset implementing [`Simulation`]
//! - [`levels`]: built-in plans and JSON level packs
//! - [`rng`]: small deterministic LCG
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use tui_platformer_core::{Level, Simulation, State};
//! use tui_platformer_types::{Keys, Status};
//!
//! let level = Rc::new(Level::parse("
//!     .....
//!     .@.o.
//!     ######
//! ").unwrap());
//!
//! let mut state = State::start(level);
//! let right = Keys { right: true, ..Keys::default() };
//! for _ in 0..60 {
//!     state = state.update(1.0 / 60.0, right);
//! }
//! assert_eq!(state.status(), Status::Won);
//! ```

pub mod level;
pub mod levels;
pub mod rng;
pub mod simulation;
pub mod state;

pub use tui_platformer_types as types;

// Re-export commonly used types for convenience
pub use level::{Level, LevelError, Spawn};
pub use levels::{LevelPack, GAME_LEVELS};
pub use rng::SimpleRng;
pub use simulation::Simulation;
pub use state::State;
