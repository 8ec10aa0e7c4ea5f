//! The narrow interface between the render/loop core and a simulation.
//!
//! The core never looks inside a simulation: it starts one per level run,
//! feeds it elapsed time and the tick-start key snapshot, and reads back
//! status and actors for drawing. Each update produces a new snapshot; the
//! previous one is dropped by the caller.

use std::rc::Rc;

use crate::level::Level;
use crate::types::{Actor, Keys, Status};

pub trait Simulation: Sized {
    /// Fresh snapshot at the start of a level run.
    fn start(level: Rc<Level>) -> Self;

    /// Advance by `dt` seconds with the keys held at the start of the tick.
    fn update(&self, dt: f64, keys: Keys) -> Self;

    fn level(&self) -> &Level;

    fn status(&self) -> Status;

    fn player(&self) -> &Actor;

    /// Every drawable actor, the player included.
    fn actors(&self) -> &[Actor];
}
