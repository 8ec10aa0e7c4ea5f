//! Display: composes one simulation snapshot into a pixel surface.
//!
//! This module is pure (no I/O). Every frame runs the same fixed pipeline:
//!
//! 1. move the camera ([`Viewport::track`])
//! 2. wash the whole surface with the status color
//! 3. draw the visible background tiles
//! 4. draw every actor on top
//!
//! Tests can plug in any [`Surface`] to observe the exact draw calls.

use crate::canvas::{Rect, Sprite, Surface};
use crate::core::{Level, Simulation};
use crate::fb::Rgb;
use crate::sprite::{coin_frame, player_frame, update_facing};
use crate::types::{
    Actor, ActorKind, Status, TileKind, MAX_SURFACE_HEIGHT, MAX_SURFACE_WIDTH, PLAYER_X_OVERLAP,
    SCALE,
};
use crate::viewport::Viewport;

pub const PLAYING_COLOR: Rgb = Rgb::new(52, 166, 251);
pub const WON_COLOR: Rgb = Rgb::new(68, 191, 255);
pub const LOST_COLOR: Rgb = Rgb::new(44, 136, 214);

/// Sky color behind everything else.
pub fn status_color(status: Status) -> Rgb {
    match status {
        Status::Won => WON_COLOR,
        Status::Lost => LOST_COLOR,
        Status::Playing => PLAYING_COLOR,
    }
}

/// Pixel geometry of the display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Surface pixels per tile.
    pub scale: f64,
    pub max_width: u32,
    pub max_height: u32,
    /// Player art overhang beyond the hitbox on each side, in pixels.
    pub player_x_overlap: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: SCALE,
            max_width: MAX_SURFACE_WIDTH,
            max_height: MAX_SURFACE_HEIGHT,
            player_x_overlap: PLAYER_X_OVERLAP,
        }
    }
}

impl DisplayConfig {
    /// Surface size for a level: the whole level, capped at the maximum.
    pub fn surface_size(&self, level: &Level) -> (u32, u32) {
        let width = (level.width() as f64 * self.scale) as u32;
        let height = (level.height() as f64 * self.scale) as u32;
        (width.min(self.max_width), height.min(self.max_height))
    }
}

pub struct Display<S: Surface> {
    surface: S,
    viewport: Viewport,
    /// Sticky facing; survives frames where the player stands still.
    flip_player: bool,
    config: DisplayConfig,
}

impl<S: Surface> Display<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, DisplayConfig::default())
    }

    pub fn with_config(surface: S, config: DisplayConfig) -> Self {
        let viewport = Viewport::new(
            surface.width() as f64 / config.scale,
            surface.height() as f64 / config.scale,
        );
        Self {
            surface,
            viewport,
            flip_player: false,
            config,
        }
    }

    /// Render one snapshot. `now_ms` is wall-clock time for sprite cycles.
    pub fn sync_state<Sim: Simulation>(&mut self, state: &Sim, now_ms: u64) {
        let level = state.level();
        self.viewport.track(
            state.player(),
            level.width() as f64,
            level.height() as f64,
        );
        self.surface.fill(status_color(state.status()));
        self.draw_background(level);
        self.draw_actors(state.actors(), now_ms);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn flip_player(&self) -> bool {
        self.flip_player
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tear down the display, handing the surface back for release.
    pub fn clear(self) -> S {
        self.surface
    }

    fn draw_background(&mut self, level: &Level) {
        let Viewport {
            left,
            top,
            width,
            height,
        } = self.viewport;
        let scale = self.config.scale;
        let x_start = left.floor() as usize;
        let x_end = (left + width).ceil() as usize;
        let y_start = top.floor() as usize;
        let y_end = (top + height).ceil() as usize;
        let src = Rect::new(0.0, 0.0, scale, scale);

        for y in y_start..y_end {
            for x in x_start..x_end {
                let Some(tile) = level.tile(x, y) else {
                    continue;
                };
                let sprite = match tile {
                    TileKind::Empty => continue,
                    TileKind::Lava => Sprite::Lava,
                    TileKind::Ground => {
                        let above = if y > 0 { level.tile(x, y - 1) } else { None };
                        if above == Some(TileKind::Empty) {
                            Sprite::GroundTop
                        } else {
                            Sprite::GroundFill
                        }
                    }
                };
                let dst = Rect::new(
                    (x as f64 - left) * scale,
                    (y as f64 - top) * scale,
                    scale,
                    scale,
                );
                self.surface.draw_sprite(sprite, src, dst, false);
            }
        }
    }

    fn draw_actors(&mut self, actors: &[Actor], now_ms: u64) {
        let scale = self.config.scale;
        for actor in actors {
            let width = actor.size.x * scale;
            let height = actor.size.y * scale;
            let x = (actor.pos.x - self.viewport.left) * scale;
            let y = (actor.pos.y - self.viewport.top) * scale;
            match actor.kind {
                ActorKind::Player => self.draw_player(actor, x, y, width, height, now_ms),
                ActorKind::Coin => {
                    let frame = coin_frame(now_ms) as f64;
                    self.surface.draw_sprite(
                        Sprite::Coin,
                        Rect::new(frame * width, 0.0, width, height),
                        Rect::new(x, y, width, height),
                        false,
                    );
                }
                // Hazards and any kind this renderer does not know.
                _ => self.surface.draw_sprite(
                    Sprite::Lava,
                    Rect::new(0.0, 0.0, width, height),
                    Rect::new(x, y, width, height),
                    false,
                ),
            }
        }
    }

    fn draw_player(&mut self, player: &Actor, x: f64, y: f64, width: f64, height: f64, now_ms: u64) {
        let overlap = self.config.player_x_overlap;
        let width = width + overlap * 2.0;
        let x = x - overlap;

        self.flip_player = update_facing(self.flip_player, player.speed);
        let frame = player_frame(player.speed, now_ms) as f64;

        self.surface.draw_sprite(
            Sprite::Player,
            Rect::new(frame * width, 0.0, width, height),
            Rect::new(x, y, width, height),
            self.flip_player,
        );
    }
}
