//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (simulation, rendering, input, loop control).
//!
//! # Units
//!
//! Positions and sizes are measured in **tiles** (one grid cell of a level).
//! The renderer converts tiles to surface pixels with [`SCALE`].
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default refresh tick period (~60 FPS) |
//! | `MAX_STEP_MS` | 100 | Largest elapsed time fed into one simulation step |
//! | `ENDING_DELAY_SECS` | 1.0 | How long a won/lost level keeps rendering |
//! | `ANIMATION_FRAME_MS` | 60 | Wall-clock duration of one sprite animation frame |
//!
//! # Surface Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SCALE` | 5 | Surface pixels per tile |
//! | `MAX_SURFACE_WIDTH` | 120 | Widest surface in pixels (24 tiles) |
//! | `MAX_SURFACE_HEIGHT` | 80 | Tallest surface in pixels (16 tiles) |
//! | `PLAYER_X_OVERLAP` | 2 | Player art overhang on each side of the hitbox, in pixels |
//!
//! # Examples
//!
//! ```
//! use tui_platformer_types::{Actor, ActorKind, Keys, Key, Status, Vec2};
//!
//! let player = Actor::new(ActorKind::Player, Vec2::new(3.0, 4.5), Vec2::new(1.0, 1.5));
//! assert_eq!(player.center(), Vec2::new(3.5, 5.25));
//!
//! let mut keys = Keys::default();
//! keys.set(Key::Right, true);
//! assert!(keys.right && !keys.left);
//!
//! assert_eq!(Status::Won.to_string(), "won");
//! ```

use std::ops::{Add, Mul, Sub};

/// Default refresh tick period in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Upper bound on the elapsed time of a single simulation step (100ms)
pub const MAX_STEP_MS: f64 = 100.0;

/// Seconds a finished level keeps animating before it resolves
pub const ENDING_DELAY_SECS: f64 = 1.0;

/// Wall-clock duration of one animation frame for walk and coin cycles
pub const ANIMATION_FRAME_MS: u64 = 60;

/// Number of frames in the player walk cycle and in the coin spin
pub const WALK_CYCLE_FRAMES: u32 = 7;

/// Player atlas frame used while airborne
pub const JUMP_FRAME: u32 = 1;

/// Player atlas frame used while standing still (one past the walk cycle)
pub const IDLE_FRAME: u32 = 7;

/// Surface pixels per tile
pub const SCALE: f64 = 5.0;

/// Maximum surface width in pixels
pub const MAX_SURFACE_WIDTH: u32 = 120;

/// Maximum surface height in pixels
pub const MAX_SURFACE_HEIGHT: u32 = 80;

/// Horizontal overhang of the player art beyond its hitbox, in pixels
pub const PLAYER_X_OVERLAP: f64 = 2.0;

/// 2D vector in tile units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Static background tile kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TileKind {
    #[default]
    Empty,
    Ground,
    Lava,
}

/// Outcome state of a level run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Playing,
    Won,
    Lost,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Playing => "playing",
            Status::Won => "won",
            Status::Lost => "lost",
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self, Status::Playing)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawable entity kinds.
///
/// New kinds may be added; renderers draw kinds they do not know as hazards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ActorKind {
    Player,
    Coin,
    Hazard,
}

/// One moving entity as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actor {
    pub kind: ActorKind,
    /// Top-left corner in tiles.
    pub pos: Vec2,
    pub size: Vec2,
    /// Tiles per second.
    pub speed: Vec2,
}

impl Actor {
    pub fn new(kind: ActorKind, pos: Vec2, size: Vec2) -> Self {
        Self {
            kind,
            pos,
            size,
            speed: Vec2::ZERO,
        }
    }

    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Axis-aligned overlap test (touching edges do not overlap).
    pub fn overlaps(&self, other: &Actor) -> bool {
        self.pos.x + self.size.x > other.pos.x
            && self.pos.x < other.pos.x + other.size.x
            && self.pos.y + self.size.y > other.pos.y
            && self.pos.y < other.pos.y + other.size.y
    }
}

/// The tracked key set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
}

impl Key {
    pub const ALL: [Key; 3] = [Key::Left, Key::Right, Key::Up];

    pub fn index(self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
        }
    }
}

/// Held state of every tracked key, as of the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Keys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl Keys {
    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Up => self.up,
        }
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Up => self.up = held,
        }
    }
}
