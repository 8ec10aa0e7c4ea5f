//! Reference simulation: a small arcade ruleset driving the renderer.
//!
//! - The player runs at 7 tiles/s, falls with gravity 30 and jumps at 17.
//!   Horizontal and vertical motion are resolved separately against ground.
//! - Coins bob up and down around their spawn point.
//! - Moving lava bounces off ground; dripping lava restarts from its spawn.
//! - Touching lava (tile or actor) loses the level, collecting the last coin
//!   wins it. After that the status is frozen while actors keep moving.

use std::f64::consts::TAU;
use std::rc::Rc;

use crate::level::{Level, Spawn};
use crate::rng::SimpleRng;
use crate::simulation::Simulation;
use crate::types::{Actor, ActorKind, Keys, Status, TileKind, Vec2};

pub const PLAYER_SIZE: Vec2 = Vec2::new(0.8, 1.5);
pub const COIN_SIZE: Vec2 = Vec2::new(0.6, 0.6);
pub const LAVA_SIZE: Vec2 = Vec2::new(1.0, 1.0);

const PLAYER_X_SPEED: f64 = 7.0;
const GRAVITY: f64 = 30.0;
const JUMP_SPEED: f64 = 17.0;
const WOBBLE_SPEED: f64 = 8.0;
const WOBBLE_DIST: f64 = 0.07;

const DEFAULT_SEED: u32 = 0x5EED;

/// Per-actor state the renderer never sees.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Motion {
    Player,
    Coin { base: Vec2, wobble: f64 },
    Lava { reset: Option<Vec2> },
}

#[derive(Debug, Clone)]
pub struct State {
    level: Rc<Level>,
    actors: Vec<Actor>,
    motions: Vec<Motion>,
    player: usize,
    status: Status,
}

impl State {
    /// Start a run with a specific seed for the coin wobble phases.
    pub fn start_seeded(level: Rc<Level>, seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let mut actors = Vec::with_capacity(level.spawns().len());
        let mut motions = Vec::with_capacity(level.spawns().len());
        let mut player = 0;

        for spawn in level.spawns() {
            let (actor, motion) = match *spawn {
                Spawn::Player { pos } => {
                    player = actors.len();
                    (Actor::new(ActorKind::Player, pos, PLAYER_SIZE), Motion::Player)
                }
                Spawn::Coin { pos } => (
                    Actor::new(ActorKind::Coin, pos, COIN_SIZE),
                    Motion::Coin {
                        base: pos,
                        wobble: rng.next_f64() * TAU,
                    },
                ),
                Spawn::Lava { pos, speed, drips } => (
                    Actor::new(ActorKind::Hazard, pos, LAVA_SIZE).with_speed(speed),
                    Motion::Lava {
                        reset: drips.then_some(pos),
                    },
                ),
            };
            actors.push(actor);
            motions.push(motion);
        }

        Self {
            level,
            actors,
            motions,
            player,
            status: Status::Playing,
        }
    }

    pub fn coins_left(&self) -> usize {
        self.actors
            .iter()
            .filter(|a| a.kind == ActorKind::Coin)
            .count()
    }

    fn step_actor(&self, actor: &Actor, motion: Motion, dt: f64, keys: Keys) -> (Actor, Motion) {
        match motion {
            Motion::Player => (self.step_player(actor, dt, keys), motion),
            Motion::Coin { base, wobble } => {
                let wobble = wobble + dt * WOBBLE_SPEED;
                let pos = base + Vec2::new(0.0, wobble.sin() * WOBBLE_DIST);
                (Actor { pos, ..*actor }, Motion::Coin { base, wobble })
            }
            Motion::Lava { reset } => {
                let moved = actor.pos + actor.speed * dt;
                let next = if !self.level.touches(moved, actor.size, TileKind::Ground) {
                    Actor { pos: moved, ..*actor }
                } else if let Some(origin) = reset {
                    Actor { pos: origin, ..*actor }
                } else {
                    Actor {
                        speed: actor.speed * -1.0,
                        ..*actor
                    }
                };
                (next, motion)
            }
        }
    }

    fn step_player(&self, player: &Actor, dt: f64, keys: Keys) -> Actor {
        let mut x_speed = 0.0;
        if keys.left {
            x_speed -= PLAYER_X_SPEED;
        }
        if keys.right {
            x_speed += PLAYER_X_SPEED;
        }

        let mut pos = player.pos;
        let moved_x = pos + Vec2::new(x_speed * dt, 0.0);
        if !self.level.touches(moved_x, player.size, TileKind::Ground) {
            pos = moved_x;
        }

        let mut y_speed = player.speed.y + dt * GRAVITY;
        let moved_y = pos + Vec2::new(0.0, y_speed * dt);
        if !self.level.touches(moved_y, player.size, TileKind::Ground) {
            pos = moved_y;
        } else if keys.up && y_speed > 0.0 {
            y_speed = -JUMP_SPEED;
        } else {
            y_speed = 0.0;
        }

        Actor {
            pos,
            speed: Vec2::new(x_speed, y_speed),
            ..*player
        }
    }
}

impl Simulation for State {
    fn start(level: Rc<Level>) -> Self {
        Self::start_seeded(level, DEFAULT_SEED)
    }

    fn update(&self, dt: f64, keys: Keys) -> Self {
        let mut actors = Vec::with_capacity(self.actors.len());
        let mut motions = Vec::with_capacity(self.motions.len());
        for (actor, motion) in self.actors.iter().zip(&self.motions) {
            let (actor, motion) = self.step_actor(actor, *motion, dt, keys);
            actors.push(actor);
            motions.push(motion);
        }

        let mut next = State {
            level: Rc::clone(&self.level),
            actors,
            motions,
            player: self.player,
            status: self.status,
        };
        if !next.status.is_playing() {
            return next;
        }

        let player = next.actors[next.player];
        if next
            .level
            .touches(player.pos, player.size, TileKind::Lava)
        {
            next.status = Status::Lost;
            return next;
        }

        let mut keep = vec![true; next.actors.len()];
        for i in 0..next.actors.len() {
            if i == next.player || !next.actors[i].overlaps(&player) {
                continue;
            }
            match next.actors[i].kind {
                ActorKind::Coin => {
                    keep[i] = false;
                    let coins_remaining = next
                        .actors
                        .iter()
                        .zip(&keep)
                        .any(|(a, kept)| *kept && a.kind == ActorKind::Coin);
                    if !coins_remaining {
                        next.status = Status::Won;
                    }
                }
                _ => next.status = Status::Lost,
            }
        }

        if keep.iter().any(|kept| !kept) {
            let removed_before_player = keep[..next.player].iter().filter(|k| !**k).count();
            let mut flags = keep.iter();
            next.actors.retain(|_| *flags.next().unwrap_or(&true));
            let mut flags = keep.iter();
            next.motions.retain(|_| *flags.next().unwrap_or(&true));
            next.player -= removed_before_player;
        }

        next
    }

    fn level(&self) -> &Level {
        &self.level
    }

    fn status(&self) -> Status {
        self.status
    }

    fn player(&self) -> &Actor {
        &self.actors[self.player]
    }

    fn actors(&self) -> &[Actor] {
        &self.actors
    }
}
